//! Pitch identifiers for the buzzer's note table
//!
//! Maps MIDI note numbers onto the symbolic `noteFrequency_t` names the
//! firmware understands (`C_4`, `C_SHARP_4`, ..., `SILENCE`).

use std::fmt;

use serde::{Serialize, Serializer};

use crate::converters::midi_to_song::{Result, SongError};

/// Lowest MIDI note number with a pitch identifier (C_0)
pub const LOWEST_NOTE: u8 = 12;

/// Highest MIDI note number with a pitch identifier (B_8)
pub const HIGHEST_NOTE: u8 = 119;

/// MIDI note number that resolves to silence
pub const SILENCE_NOTE: u8 = 0;

const TABLE_LEN: usize = (HIGHEST_NOTE - LOWEST_NOTE + 1) as usize;

/// The twelve semitone names of one octave, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semitone {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

const SEMITONES: [Semitone; 12] = [
    Semitone::C,
    Semitone::CSharp,
    Semitone::D,
    Semitone::DSharp,
    Semitone::E,
    Semitone::F,
    Semitone::FSharp,
    Semitone::G,
    Semitone::GSharp,
    Semitone::A,
    Semitone::ASharp,
    Semitone::B,
];

impl Semitone {
    /// Symbol used in the firmware enum (`C_SHARP`, `D`, ...)
    pub fn symbol(self) -> &'static str {
        match self {
            Semitone::C => "C",
            Semitone::CSharp => "C_SHARP",
            Semitone::D => "D",
            Semitone::DSharp => "D_SHARP",
            Semitone::E => "E",
            Semitone::F => "F",
            Semitone::FSharp => "F_SHARP",
            Semitone::G => "G",
            Semitone::GSharp => "G_SHARP",
            Semitone::A => "A",
            Semitone::ASharp => "A_SHARP",
            Semitone::B => "B",
        }
    }
}

/// A symbolic pitch: either silence or a semitone in octaves 0-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchId {
    Silence,
    Tone { semitone: Semitone, octave: u8 },
}

/// Dense lookup table indexed by `note - LOWEST_NOTE`
static PITCH_TABLE: [PitchId; TABLE_LEN] = build_pitch_table();

const fn build_pitch_table() -> [PitchId; TABLE_LEN] {
    let mut table = [PitchId::Silence; TABLE_LEN];
    let mut i = 0;
    while i < TABLE_LEN {
        table[i] = PitchId::Tone {
            semitone: SEMITONES[i % 12],
            octave: (i / 12) as u8,
        };
        i += 1;
    }
    table
}

/// Resolve a MIDI note number to its pitch identifier
///
/// Defined for `0` (silence) and `12..=119`. Anything else is a
/// [`SongError::PitchResolution`].
pub fn resolve(note: u8) -> Result<PitchId> {
    match note {
        SILENCE_NOTE => Ok(PitchId::Silence),
        LOWEST_NOTE..=HIGHEST_NOTE => Ok(PITCH_TABLE[(note - LOWEST_NOTE) as usize]),
        _ => Err(SongError::PitchResolution(note)),
    }
}

impl PitchId {
    /// MIDI note number this identifier was resolved from (0 for silence)
    pub fn midi_note(self) -> u8 {
        match self {
            PitchId::Silence => SILENCE_NOTE,
            PitchId::Tone { semitone, octave } => {
                LOWEST_NOTE + octave * 12 + semitone as u8
            }
        }
    }

    /// Tone frequency in Hz as the firmware's `noteFrequency_t` defines it
    ///
    /// Equal temperament around A_4 = 440 Hz, rounded to the nearest Hz.
    /// Silence is 0.
    pub fn frequency_hz(self) -> u32 {
        match self {
            PitchId::Silence => 0,
            PitchId::Tone { .. } => {
                let offset = self.midi_note() as f64 - 69.0;
                (440.0 * 2f64.powf(offset / 12.0)).round() as u32
            }
        }
    }

    pub fn is_silence(self) -> bool {
        matches!(self, PitchId::Silence)
    }
}

impl fmt::Display for PitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchId::Silence => f.write_str("SILENCE"),
            PitchId::Tone { semitone, octave } => write!(f, "{}_{}", semitone.symbol(), octave),
        }
    }
}

/// Serialized as the firmware symbol, e.g. `"A_SHARP_3"`
impl Serialize for PitchId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
