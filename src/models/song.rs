//! Song model: the monophonic segment timeline handed to the buzzer

use serde::Serialize;

use super::pitch::PitchId;

/// One tone (or rest) of the timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSegment {
    pub pitch: PitchId,
    /// Always at least 1; zero-length segments are never built
    pub time_ms: u32,
    /// Square-wave duty cycle in [0, 0.5] at the moment the segment was emitted
    pub duty_cycle_pct: f64,
}

/// Ordered segment timeline plus the loop flag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub segments: Vec<NoteSegment>,
    pub should_loop: bool,
}

impl Song {
    /// Number of segments; derived, never stored
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.segments.iter().map(|s| s.time_ms as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Wrap a segment sequence and loop flag into a [`Song`]
pub fn assemble(segments: Vec<NoteSegment>, should_loop: bool) -> Song {
    Song {
        segments,
        should_loop,
    }
}
