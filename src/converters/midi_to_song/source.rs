//! Standard MIDI File decoding into a single timed event stream
//!
//! All tracks are merged onto one timeline by absolute tick. Events at the
//! same tick keep their file order (track order first, then position within
//! the track). Delta ticks become seconds through the tempo map.

use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use super::defaults::DEFAULT_TEMPO_US_PER_BEAT;
use super::events::{EventKind, TimedEvent};
use super::settings::ConversionSettings;
use super::{Result, SongError};

/// Merged event before tick-to-seconds conversion
#[derive(Debug, Clone, Copy)]
struct MergedEvent {
    tick: u64,
    kind: EventKind,
    /// Tempo change taking effect after this event, in microseconds per beat
    tempo: Option<u32>,
}

/// How ticks map onto seconds
#[derive(Debug, Clone, Copy)]
enum Clock {
    /// Ticks per beat; the beat length follows the tempo map
    Metrical { ticks_per_beat: u16 },
    /// Fixed ticks per second (SMPTE frames x subframes)
    Timecode { ticks_per_second: f64 },
}

impl Clock {
    fn from_timing(timing: Timing) -> Self {
        match timing {
            Timing::Metrical(tpb) => Clock::Metrical {
                ticks_per_beat: tpb.as_int().max(1),
            },
            Timing::Timecode(fps, subframes) => Clock::Timecode {
                ticks_per_second: (fps.as_f32() as f64 * subframes.max(1) as f64).max(1.0),
            },
        }
    }

    fn ticks_to_secs(self, ticks: u64, tempo_us_per_beat: u32) -> f64 {
        match self {
            Clock::Metrical { ticks_per_beat } => {
                ticks as f64 * tempo_us_per_beat as f64 / (1_000_000.0 * ticks_per_beat as f64)
            }
            Clock::Timecode { ticks_per_second } => ticks as f64 / ticks_per_second,
        }
    }
}

/// Decode SMF bytes into the delta-timed event stream
pub fn parse_midi_events(bytes: &[u8], settings: &ConversionSettings) -> Result<Vec<TimedEvent>> {
    let smf = Smf::parse(bytes).map_err(|e| SongError::Midi(format!("Failed to parse MIDI: {}", e)))?;
    events_from_smf(&smf, settings)
}

/// Flatten an already parsed [`Smf`] into the delta-timed event stream
pub fn events_from_smf(smf: &Smf, settings: &ConversionSettings) -> Result<Vec<TimedEvent>> {
    if smf.header.format == Format::Sequential {
        return Err(SongError::UnsupportedFormat(
            "type 2 (sequential) MIDI files cannot be merged into one timeline".to_string(),
        ));
    }

    let clock = Clock::from_timing(smf.header.timing);
    let (merged, end_tick) = merge_tracks(smf, settings);

    log::debug!(
        "merged {} events from {} tracks, last tick {}",
        merged.len(),
        smf.tracks.len(),
        end_tick
    );

    let mut events = Vec::with_capacity(merged.len() + 1);
    let mut tempo = DEFAULT_TEMPO_US_PER_BEAT;
    let mut last_tick = 0u64;

    for event in &merged {
        let delta_secs = clock.ticks_to_secs(event.tick - last_tick, tempo);
        events.push(TimedEvent::new(delta_secs, event.kind));
        last_tick = event.tick;
        if let Some(new_tempo) = event.tempo {
            tempo = new_tempo;
        }
    }

    // Single end-of-track marker so trailing rests survive the merge
    let delta_secs = clock.ticks_to_secs(end_tick.saturating_sub(last_tick), tempo);
    events.push(TimedEvent::other(delta_secs));

    Ok(events)
}

/// Merge all tracks by absolute tick
///
/// Per-track end-of-track markers are dropped; the latest one is returned as
/// the overall end tick.
fn merge_tracks(smf: &Smf, settings: &ConversionSettings) -> (Vec<MergedEvent>, u64) {
    let mut merged = Vec::new();
    let mut end_tick = 0u64;

    for (track_index, track) in smf.tracks.iter().enumerate() {
        let mut tick = 0u64;
        let mut note_events = 0usize;

        for event in track.iter() {
            tick += event.delta.as_int() as u64;

            if let TrackEventKind::Meta(MetaMessage::EndOfTrack) = event.kind {
                end_tick = end_tick.max(tick);
                continue;
            }

            let kind = classify(&event.kind, settings);
            if matches!(kind, EventKind::NoteOn { .. } | EventKind::NoteOff { .. }) {
                note_events += 1;
            }

            let tempo = match event.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(us_per_beat)) => Some(us_per_beat.as_int()),
                _ => None,
            };

            merged.push(MergedEvent { tick, kind, tempo });
        }

        end_tick = end_tick.max(tick);
        log::debug!("track {}: {} events, {} note events", track_index, track.len(), note_events);
    }

    // Stable: equal ticks keep track order, then in-track order
    merged.sort_by_key(|e| e.tick);

    (merged, end_tick)
}

/// Reduce a track event to the kinds the segment builder distinguishes
fn classify(kind: &TrackEventKind, settings: &ConversionSettings) -> EventKind {
    let (channel, message) = match kind {
        TrackEventKind::Midi { channel, message } => (channel.as_int(), message),
        _ => return EventKind::Other,
    };

    if settings.channel.is_some_and(|wanted| wanted != channel) {
        return EventKind::Other;
    }

    match *message {
        MidiMessage::NoteOn { key, vel } => {
            if vel.as_int() == 0 && settings.velocity_zero_is_note_off {
                EventKind::NoteOff { note: key.as_int() }
            } else {
                EventKind::NoteOn {
                    note: key.as_int(),
                    velocity: vel.as_int(),
                }
            }
        }
        MidiMessage::NoteOff { key, .. } => EventKind::NoteOff { note: key.as_int() },
        MidiMessage::Controller { controller, value } => EventKind::ControlChange {
            controller: controller.as_int(),
            value: value.as_int(),
        },
        _ => EventKind::Other,
    }
}
