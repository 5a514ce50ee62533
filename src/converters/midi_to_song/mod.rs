//! MIDI to buzzer song conversion
//!
//! Turns a Standard MIDI File into the monophonic `song_t` table the
//! square-wave buzzer plays.
//!
//! # Pipeline
//! 1. **Decode**: merge SMF tracks into one delta-timed event stream (`source`)
//! 2. **Build**: fold the stream into pitch/duration segments (`builder`)
//! 3. **Assemble**: wrap segments and the loop flag into a [`Song`]
//! 4. **Render**: emit the C table literal (`renderers::song_table`)
//!
//! ```rust,ignore
//! use midi_beeper::converters::midi_to_song::{midi_to_song_table, ConversionSettings};
//!
//! let bytes = std::fs::read("theme.mid")?;
//! let table = midi_to_song_table(&bytes, &ConversionSettings::default().table_name("theme"))?;
//! print!("{}", table);
//! ```

pub mod builder;
pub mod defaults;
pub mod events;
pub mod settings;
pub mod source;

#[cfg(test)]
mod tests;

pub use builder::{build_segments, SegmentBuilder};
pub use events::{EventKind, TimedEvent};
pub use settings::ConversionSettings;
pub use source::{events_from_smf, parse_midi_events};

use std::path::Path;

use thiserror::Error;

use crate::models::song::{assemble, Song};
use crate::renderers::song_table::{render_song_table, validate_table_name};

#[derive(Debug, Error)]
pub enum SongError {
    /// A held note has no pitch identifier (outside 0 and 12-119)
    #[error("note number {0} has no pitch identifier")]
    PitchResolution(u8),
    #[error("midi decode error: {0}")]
    Midi(String),
    #[error("unsupported midi file: {0}")]
    UnsupportedFormat(String),
    #[error("invalid table name '{0}': must be a C identifier")]
    InvalidTableName(String),
    #[error("invalid settings: {0}")]
    Settings(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SongError>;

/// Fold an event stream into a [`Song`] using the given settings
pub fn convert_events(events: &[TimedEvent], settings: &ConversionSettings) -> Result<Song> {
    let segments = build_segments(events, settings.flush_held_tail)?;
    Ok(assemble(segments, settings.should_loop))
}

/// Decode SMF bytes and convert them into a [`Song`]
pub fn midi_to_song(bytes: &[u8], settings: &ConversionSettings) -> Result<Song> {
    settings.validate()?;
    let events = parse_midi_events(bytes, settings)?;
    let song = convert_events(&events, settings)?;

    log::info!(
        "converted {} events into {} segments ({} ms total)",
        events.len(),
        song.num_segments(),
        song.total_duration_ms()
    );

    Ok(song)
}

/// Convert SMF bytes straight to the `song_t` table text
pub fn midi_to_song_table(bytes: &[u8], settings: &ConversionSettings) -> Result<String> {
    validate_table_name(&settings.table_name)?;
    let song = midi_to_song(bytes, settings)?;
    Ok(render_song_table(&song, &settings.table_name))
}

/// Read a MIDI file from disk and convert it to the `song_t` table text
pub fn midi_file_to_song_table<P: AsRef<Path>>(path: P, settings: &ConversionSettings) -> Result<String> {
    let path = path.as_ref();
    log::debug!("reading {}", path.display());
    let bytes = std::fs::read(path)?;
    midi_to_song_table(&bytes, settings)
}
