//! Renderers module
//!
//! Output formats for a converted [`Song`](crate::models::song::Song).

pub mod json;
pub mod song_table;

// Re-export commonly used functions
pub use json::render_song_json;
pub use song_table::{render_song_table, validate_table_name};
