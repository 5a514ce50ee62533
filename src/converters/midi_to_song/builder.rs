//! Event stream to segment timeline
//!
//! A monophonic fold over the decoded events. At most one note is held at a
//! time; a new note_on cuts the held note off, and every gap between notes is
//! emitted as a SILENCE segment so the timeline stays contiguous.
//!
//! | held | event              | emits                | held after |
//! |------|--------------------|----------------------|------------|
//! | none | note_on(n)         | SILENCE              | n          |
//! | m    | note_on(n)         | pitch(m)             | n          |
//! | none | note_off(n)        | -                    | none       |
//! | m    | note_off(n), n != m| -                    | m          |
//! | m    | note_off(m)        | pitch(m)             | none       |
//! | any  | control_change(1)  | - (sets duty cycle)  | unchanged  |
//! | any  | other              | -                    | unchanged  |
//!
//! Events that emit nothing add their delta to the running accumulator.

use crate::models::pitch::{resolve, PitchId, SILENCE_NOTE};
use crate::models::song::NoteSegment;

use super::defaults::{duty_cycle_from_controller, DEFAULT_DUTY_CYCLE_PCT, MODULATION_CONTROLLER};
use super::events::{EventKind, TimedEvent};
use super::Result;

/// Truncate a span in seconds to whole milliseconds
fn secs_to_millis(secs: f64) -> u32 {
    (secs * 1000.0) as u32
}

/// Builder state for one conversion pass
#[derive(Debug)]
pub struct SegmentBuilder {
    held_note: Option<u8>,
    silent_secs: f64,
    duty_cycle_pct: f64,
    segments: Vec<NoteSegment>,
}

impl Default for SegmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentBuilder {
    pub fn new() -> Self {
        Self {
            held_note: None,
            silent_secs: 0.0,
            duty_cycle_pct: DEFAULT_DUTY_CYCLE_PCT,
            segments: Vec::new(),
        }
    }

    pub fn held_note(&self) -> Option<u8> {
        self.held_note
    }

    pub fn duty_cycle_pct(&self) -> f64 {
        self.duty_cycle_pct
    }

    /// Segments emitted so far
    pub fn segments(&self) -> &[NoteSegment] {
        &self.segments
    }

    /// Feed the next event of the stream
    pub fn push(&mut self, event: &TimedEvent) -> Result<()> {
        let delta = event.delta_secs;

        match event.kind {
            EventKind::NoteOn { note, .. } => {
                // Monophonic: a held note is cut off, otherwise the gap was silence
                let closing = self.held_note.unwrap_or(SILENCE_NOTE);
                self.close_span(closing, delta)?;
                self.held_note = Some(note);
            }
            EventKind::NoteOff { note } if self.held_note == Some(note) => {
                self.close_span(note, delta)?;
                self.held_note = None;
            }
            EventKind::ControlChange { controller, value } if controller == MODULATION_CONTROLLER => {
                self.duty_cycle_pct = duty_cycle_from_controller(value);
                log::debug!("duty cycle -> {:.4} (controller value {})", self.duty_cycle_pct, value);
                self.silent_secs += delta;
            }
            // Stray or mismatched note_off, other controllers, everything else
            _ => self.silent_secs += delta,
        }

        Ok(())
    }

    /// End the pass and return the timeline
    ///
    /// Trailing silence is emitted when nothing is held. A note still held is
    /// dropped unless `flush_held_tail` is set.
    pub fn finish(mut self, flush_held_tail: bool) -> Result<Vec<NoteSegment>> {
        match self.held_note.take() {
            Some(note) if flush_held_tail => self.close_span(note, 0.0)?,
            Some(note) => {
                let dropped_ms = secs_to_millis(self.silent_secs);
                if dropped_ms > 0 {
                    log::warn!(
                        "note {} still held at end of stream, dropping its {} ms",
                        note,
                        dropped_ms
                    );
                }
            }
            None => self.close_span(SILENCE_NOTE, 0.0)?,
        }

        Ok(self.segments)
    }

    /// Emit the span ending now as a segment of `note` and reset the accumulator
    fn close_span(&mut self, note: u8, delta: f64) -> Result<()> {
        let time_ms = secs_to_millis(self.silent_secs + delta);
        self.silent_secs = 0.0;

        if time_ms == 0 {
            return Ok(());
        }

        let pitch = resolve(note)?;
        self.emit(pitch, time_ms);
        Ok(())
    }

    fn emit(&mut self, pitch: PitchId, time_ms: u32) {
        log::debug!(
            "segment #{}: {} for {} ms (duty {:.4})",
            self.segments.len(),
            pitch,
            time_ms,
            self.duty_cycle_pct
        );
        self.segments.push(NoteSegment {
            pitch,
            time_ms,
            duty_cycle_pct: self.duty_cycle_pct,
        });
    }
}

/// Fold a whole event stream into a segment timeline
///
/// Either the full timeline is returned or the first error; nothing partial.
pub fn build_segments<'a, I>(events: I, flush_held_tail: bool) -> Result<Vec<NoteSegment>>
where
    I: IntoIterator<Item = &'a TimedEvent>,
{
    let mut builder = SegmentBuilder::new();
    for event in events {
        builder.push(event)?;
    }
    builder.finish(flush_held_tail)
}
