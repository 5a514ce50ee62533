//! Format converters
//!
//! This module contains converters from MIDI input to buzzer songs.

pub mod midi_to_song;

// Re-export for convenience
pub use midi_to_song::{
    convert_events,
    midi_file_to_song_table,
    midi_to_song,
    midi_to_song_table,
    ConversionSettings,
    SongError,
};
