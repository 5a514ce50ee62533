//! MIDI to buzzer song converter
//!
//! Turns MIDI files into the monophonic `song_t` tables played by a
//! square-wave buzzer, either natively (see the `midi_to_song` binary) or
//! from JavaScript through the WASM API.

pub mod api;
pub mod converters;
pub mod models;
pub mod renderers;

// Re-export commonly used types
pub use converters::midi_to_song::{
    convert_events, midi_file_to_song_table, midi_to_song, midi_to_song_table,
    ConversionSettings, EventKind, Result, SongError, TimedEvent,
};
pub use models::{NoteSegment, PitchId, Song};
pub use renderers::{render_song_json, render_song_table};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only when a logger is already installed
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("MIDI buzzer song WASM module initialized");
}
