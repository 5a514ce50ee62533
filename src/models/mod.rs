//! Models module
//!
//! Pitch identifiers and the segment timeline produced by conversion.

pub mod pitch;
pub mod song;

// Re-export commonly used types
pub use pitch::{resolve, PitchId, Semitone};
pub use song::{assemble, NoteSegment, Song};
