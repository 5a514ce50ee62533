//! Export operations for the WASM API
//!
//! This module exposes MIDI to buzzer song conversion to JavaScript:
//! - song_t table: C source for the firmware
//! - Song JSON: full segment model, including duty cycle
//! - Song object: the same model as a plain JS object

use wasm_bindgen::prelude::*;

use crate::api::helpers::{serialize, settings_from_js, song_error_to_js};
use crate::converters::midi_to_song::{midi_to_song, midi_to_song_table};
use crate::renderers::json::render_song_json;
use crate::{wasm_error, wasm_info, wasm_log};

/// Convert MIDI file bytes to a `song_t` table
///
/// # Arguments
/// * `bytes` - Standard MIDI File contents
/// * `settings` - Optional `ConversionSettings` object (camelCase fields)
///
/// # Returns
/// C source text of the table
#[wasm_bindgen(js_name = convertMidiToSongTable)]
pub fn convert_midi_to_song_table(bytes: &[u8], settings: JsValue) -> Result<String, JsValue> {
    wasm_info!("convertMidiToSongTable called ({} bytes)", bytes.len());

    let settings = settings_from_js(settings)?;
    wasm_log!("  settings: {:?}", settings);

    let table = midi_to_song_table(bytes, &settings)
        .map_err(|e| song_error_to_js("Song conversion error", e))?;

    wasm_info!("  table generated: {} bytes", table.len());
    Ok(table)
}

/// Convert MIDI file bytes to the Song JSON export
#[wasm_bindgen(js_name = convertMidiToSongJson)]
pub fn convert_midi_to_song_json(bytes: &[u8], settings: JsValue) -> Result<String, JsValue> {
    wasm_info!("convertMidiToSongJson called ({} bytes)", bytes.len());

    let settings = settings_from_js(settings)?;
    let song = midi_to_song(bytes, &settings)
        .map_err(|e| song_error_to_js("Song conversion error", e))?;

    render_song_json(&song, &settings.table_name).map_err(|e| {
        wasm_error!("JSON serialization error: {}", e);
        JsValue::from_str(&format!("JSON serialization error: {}", e))
    })
}

/// Convert MIDI file bytes to a Song object
///
/// JavaScript receives `{ segments: [{ pitch, timeMs, dutyCyclePct }], shouldLoop }`.
#[wasm_bindgen(js_name = parseMidiSong)]
pub fn parse_midi_song(bytes: &[u8], settings: JsValue) -> Result<JsValue, JsValue> {
    wasm_info!("parseMidiSong called ({} bytes)", bytes.len());

    let settings = settings_from_js(settings)?;
    let song = midi_to_song(bytes, &settings)
        .map_err(|e| song_error_to_js("Song conversion error", e))?;

    wasm_log!("  {} segments", song.num_segments());
    serialize(&song, "Song serialization error")
}
