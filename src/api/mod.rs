//! WASM API
//!
//! JavaScript-facing conversion functions.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, error handling, and logging
//! - `export`: MIDI to song table / JSON / object conversions

pub mod helpers;
pub mod export;

pub use export::{convert_midi_to_song_json, convert_midi_to_song_table, parse_midi_song};
