//! JSON export of the full segment model
//!
//! Unlike the `song_t` table this keeps the duty cycle and frequency of every
//! segment, which makes it the format to inspect when a conversion sounds off.

use serde::Serialize;

use crate::models::song::Song;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SegmentView<'a> {
    pitch: &'a crate::models::pitch::PitchId,
    frequency_hz: u32,
    time_ms: u32,
    duty_cycle_pct: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SongView<'a> {
    name: &'a str,
    num_notes: usize,
    total_ms: u64,
    should_loop: bool,
    notes: Vec<SegmentView<'a>>,
}

/// Render a [`Song`] as pretty-printed JSON
pub fn render_song_json(song: &Song, name: &str) -> serde_json::Result<String> {
    let view = SongView {
        name,
        num_notes: song.num_segments(),
        total_ms: song.total_duration_ms(),
        should_loop: song.should_loop,
        notes: song
            .segments
            .iter()
            .map(|s| SegmentView {
                pitch: &s.pitch,
                frequency_hz: s.pitch.frequency_hz(),
                time_ms: s.time_ms,
                duty_cycle_pct: s.duty_cycle_pct,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&view)
}
