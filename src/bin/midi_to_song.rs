//! Command-line MIDI to `song_t` converter
//!
//! ```text
//! midi_to_song [OPTIONS] <input.mid> > song.c
//! ```
//!
//! The table is written to stdout; diagnostics go to stderr. Set `RUST_LOG`
//! (e.g. `RUST_LOG=debug`) for per-segment logging.

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use midi_beeper::converters::midi_to_song::{
    midi_file_to_song_table, midi_to_song, ConversionSettings,
};
use midi_beeper::renderers::{render_song_json, validate_table_name};

/// Converts a MIDI file into a song_t table for the buzzer and prints it to stdout
#[derive(Debug, Parser)]
#[command(name = "midi_to_song", version, about)]
struct Cli {
    /// Input MIDI file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Read ConversionSettings from a JSON file; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Table identifier [default: song]
    #[arg(long, value_name = "IDENT")]
    name: Option<String>,

    /// Emit .shouldLoop = false
    #[arg(long)]
    no_loop: bool,

    /// Keep a note still sounding when the file ends
    #[arg(long)]
    flush_tail: bool,

    /// Only read notes and controllers from this channel
    #[arg(long, value_name = "0-15", value_parser = clap::value_parser!(u8).range(0..16))]
    channel: Option<u8>,

    /// Treat note_on with velocity 0 as note_off
    #[arg(long = "vel0-off")]
    vel0_off: bool,

    /// Print the full segment model as JSON instead of the table
    #[arg(long)]
    json: bool,
}

fn build_settings(cli: &Cli) -> Result<ConversionSettings, Box<dyn Error>> {
    let mut settings = match &cli.config {
        Some(path) => ConversionSettings::from_json(&std::fs::read_to_string(path)?)?,
        None => ConversionSettings::default(),
    };

    if let Some(name) = &cli.name {
        settings.table_name = name.clone();
    }
    if cli.no_loop {
        settings.should_loop = false;
    }
    if cli.flush_tail {
        settings.flush_held_tail = true;
    }
    if cli.channel.is_some() {
        settings.channel = cli.channel;
    }
    if cli.vel0_off {
        settings.velocity_zero_is_note_off = true;
    }

    Ok(settings)
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), Box<dyn Error>> {
    let settings = build_settings(cli)?;
    log::debug!("settings: {:?}", settings);

    if cli.json {
        validate_table_name(&settings.table_name)?;
        let bytes = std::fs::read(&cli.input)?;
        let song = midi_to_song(&bytes, &settings)?;
        writeln!(out, "{}", render_song_json(&song, &settings.table_name)?)?;
    } else {
        write!(out, "{}", midi_file_to_song_table(&cli.input, &settings)?)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
