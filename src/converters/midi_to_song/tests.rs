//! Pipeline tests: SMF bytes -> Song -> song_t text

use super::*;
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

fn midi<'a>(delta: u32, message: MidiMessage) -> TrackEvent<'a> {
    TrackEvent {
        delta: delta.into(),
        kind: TrackEventKind::Midi {
            channel: 0u8.into(),
            message,
        },
    }
}

fn on<'a>(delta: u32, key: u8) -> TrackEvent<'a> {
    midi(
        delta,
        MidiMessage::NoteOn {
            key: key.into(),
            vel: 100u8.into(),
        },
    )
}

fn off<'a>(delta: u32, key: u8) -> TrackEvent<'a> {
    midi(
        delta,
        MidiMessage::NoteOff {
            key: key.into(),
            vel: 0u8.into(),
        },
    )
}

fn modulation<'a>(delta: u32, value: u8) -> TrackEvent<'a> {
    midi(
        delta,
        MidiMessage::Controller {
            controller: 1u8.into(),
            value: value.into(),
        },
    )
}

fn end<'a>() -> TrackEvent<'a> {
    TrackEvent {
        delta: 0u32.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    }
}

fn smf_bytes(format: Format, tracks: Vec<Vec<TrackEvent<'_>>>) -> Vec<u8> {
    let mut smf = Smf::new(Header::new(format, Timing::Metrical(480u16.into())));
    smf.tracks = tracks;
    let mut out = Vec::new();
    smf.write(&mut out).unwrap();
    out
}

#[test]
fn test_a4_one_second_end_to_end() {
    // Two beats at the default 120 BPM is one second
    let bytes = smf_bytes(Format::SingleTrack, vec![vec![on(0, 69), off(960, 69), end()]]);
    let table = midi_to_song_table(&bytes, &ConversionSettings::default()).unwrap();
    assert!(table.contains("{.note = A_4, .timeMs = 1000},"));
    assert!(table.contains(".numNotes = 1,"));
    assert!(table.contains(".shouldLoop = true"));
}

#[test]
fn test_melody_with_rest_and_cutoff() {
    let bytes = smf_bytes(
        Format::SingleTrack,
        vec![vec![
            on(240, 60),
            on(480, 64), // cuts C_4 off
            off(240, 64),
            on(480, 67),
            off(480, 67),
            end(),
        ]],
    );
    let song = midi_to_song(&bytes, &ConversionSettings::default()).unwrap();
    let summary: Vec<(String, u32)> = song
        .segments
        .iter()
        .map(|s| (s.pitch.to_string(), s.time_ms))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("SILENCE".to_string(), 250),
            ("C_4".to_string(), 500),
            ("E_4".to_string(), 250),
            ("SILENCE".to_string(), 500),
            ("G_4".to_string(), 500),
        ]
    );
    assert_eq!(song.total_duration_ms(), 2000);
}

#[test]
fn test_modulation_across_tracks() {
    let bytes = smf_bytes(
        Format::Parallel,
        vec![
            vec![modulation(720, 0), end()],
            vec![on(0, 60), off(480, 60), on(0, 62), off(480, 62), end()],
        ],
    );
    let song = midi_to_song(&bytes, &ConversionSettings::default()).unwrap();
    assert_eq!(song.num_segments(), 2);
    assert_eq!(song.segments[0].duty_cycle_pct, 0.5);
    // The controller lands while D_4 is held
    assert_eq!(song.segments[1].duty_cycle_pct, 0.0);
}

#[test]
fn test_settings_flow_into_table() {
    let bytes = smf_bytes(Format::SingleTrack, vec![vec![on(0, 60), off(480, 60), end()]]);
    let settings = ConversionSettings::default()
        .table_name("level_clear")
        .should_loop(false);
    let table = midi_to_song_table(&bytes, &settings).unwrap();
    assert!(table.starts_with("const song_t level_clear =\n"));
    assert!(table.contains(".shouldLoop = false"));
}

#[test]
fn test_held_tail_setting() {
    let tracks = || vec![vec![on(0, 60), off(480, 60), on(0, 62), end_after(480)]];
    let dropped = midi_to_song(
        &smf_bytes(Format::SingleTrack, tracks()),
        &ConversionSettings::default(),
    )
    .unwrap();
    assert_eq!(dropped.num_segments(), 1);

    let flushed = midi_to_song(
        &smf_bytes(Format::SingleTrack, tracks()),
        &ConversionSettings::default().flush_held_tail(true),
    )
    .unwrap();
    assert_eq!(flushed.num_segments(), 2);
    assert_eq!(flushed.segments[1].pitch.to_string(), "D_4");
    assert_eq!(flushed.segments[1].time_ms, 500);
}

fn end_after<'a>(delta: u32) -> TrackEvent<'a> {
    TrackEvent {
        delta: delta.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    }
}

#[test]
fn test_out_of_range_note_aborts() {
    let bytes = smf_bytes(Format::SingleTrack, vec![vec![on(0, 124), off(480, 124), end()]]);
    let result = midi_to_song_table(&bytes, &ConversionSettings::default());
    assert!(matches!(result, Err(SongError::PitchResolution(124))));
}

#[test]
fn test_invalid_name_rejected_before_conversion() {
    let settings = ConversionSettings::default().table_name("not a name");
    let result = midi_to_song_table(b"garbage", &settings);
    assert!(matches!(result, Err(SongError::InvalidTableName(_))));
}

#[test]
fn test_out_of_range_channel_rejected() {
    let bytes = smf_bytes(Format::SingleTrack, vec![vec![on(0, 69), off(960, 69), end()]]);
    let settings = ConversionSettings::default().channel(Some(16));
    let result = midi_to_song_table(&bytes, &settings);
    assert!(matches!(result, Err(SongError::Settings(_))));
}

#[test]
fn test_convert_events_empty_stream() {
    let song = convert_events(&[], &ConversionSettings::default()).unwrap();
    assert_eq!(song.num_segments(), 0);
    assert!(song.should_loop);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        SongError::PitchResolution(3).to_string(),
        "note number 3 has no pitch identifier"
    );
    assert_eq!(
        SongError::InvalidTableName("x y".to_string()).to_string(),
        "invalid table name 'x y': must be a C identifier"
    );
}
