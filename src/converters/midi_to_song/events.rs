//! Decoded event stream consumed by the segment builder
//!
//! Only the message types the buzzer cares about are distinguished; every
//! other message still carries its delta time as `Other`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    ControlChange { controller: u8, value: u8 },
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    /// Seconds since the previous event in the stream (>= 0)
    pub delta_secs: f64,
    pub kind: EventKind,
}

impl TimedEvent {
    pub fn new(delta_secs: f64, kind: EventKind) -> Self {
        Self { delta_secs, kind }
    }

    pub fn note_on(delta_secs: f64, note: u8) -> Self {
        Self::new(delta_secs, EventKind::NoteOn { note, velocity: 64 })
    }

    pub fn note_off(delta_secs: f64, note: u8) -> Self {
        Self::new(delta_secs, EventKind::NoteOff { note })
    }

    pub fn control_change(delta_secs: f64, controller: u8, value: u8) -> Self {
        Self::new(delta_secs, EventKind::ControlChange { controller, value })
    }

    pub fn other(delta_secs: f64) -> Self {
        Self::new(delta_secs, EventKind::Other)
    }
}
