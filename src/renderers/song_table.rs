//! `song_t` table emitter
//!
//! Produces the static table literal the buzzer firmware compiles in:
//!
//! ```text
//! const song_t song =
//! {
//!     .notes =
//!     {
//!         {.note = C_4, .timeMs = 500},
//!     },
//!     .numNotes = 1,
//!     .shouldLoop = true
//! };
//! ```
//!
//! Only pitch and duration are written; the firmware table has no duty cycle.

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::converters::midi_to_song::{Result, SongError};
use crate::models::song::{NoteSegment, Song};

static C_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern"));

/// Check that `name` can be used as the C identifier of the table
pub fn validate_table_name(name: &str) -> Result<()> {
    if C_IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(SongError::InvalidTableName(name.to_string()))
    }
}

fn write_entry(out: &mut String, segment: &NoteSegment) {
    let _ = writeln!(
        out,
        "        {{.note = {}, .timeMs = {}}},",
        segment.pitch, segment.time_ms
    );
}

/// Render a [`Song`] as a `const song_t <name>` definition
pub fn render_song_table(song: &Song, name: &str) -> String {
    let mut out = String::with_capacity(128 + song.num_segments() * 40);

    let _ = writeln!(out, "const song_t {} =", name);
    out.push_str("{\n");
    out.push_str("    .notes =\n");
    out.push_str("    {\n");
    for segment in &song.segments {
        write_entry(&mut out, segment);
    }
    out.push_str("    },\n");
    let _ = writeln!(out, "    .numNotes = {},", song.num_segments());
    let _ = writeln!(out, "    .shouldLoop = {}", song.should_loop);
    out.push_str("};\n");

    out
}
