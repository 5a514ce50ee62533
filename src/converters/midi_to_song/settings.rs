//! Conversion settings shared by the CLI and the WASM API

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_SHOULD_LOOP, DEFAULT_TABLE_NAME, MIDI_CHANNEL_COUNT};
use super::{Result, SongError};

/// Configuration options for MIDI to song conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionSettings {
    /// Identifier of the emitted `song_t` table
    pub table_name: String,

    /// Loop flag carried through to the table
    pub should_loop: bool,

    /// Emit a note still sounding when the stream ends instead of dropping it
    pub flush_held_tail: bool,

    /// Only read channel messages from this channel (0-15); others count as time only
    pub channel: Option<u8>,

    /// Treat note_on with velocity 0 as note_off
    pub velocity_zero_is_note_off: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            should_loop: DEFAULT_SHOULD_LOOP,
            flush_held_tail: false,
            channel: None,
            velocity_zero_is_note_off: false,
        }
    }
}

impl ConversionSettings {
    /// Parse settings from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SongError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the decoder would otherwise silently ignore
    pub fn validate(&self) -> Result<()> {
        match self.channel {
            Some(channel) if channel >= MIDI_CHANNEL_COUNT => Err(SongError::Settings(format!(
                "channel {} out of range, expected 0-{}",
                channel,
                MIDI_CHANNEL_COUNT - 1
            ))),
            _ => Ok(()),
        }
    }

    pub fn table_name<S: Into<String>>(mut self, name: S) -> Self {
        self.table_name = name.into();
        self
    }

    pub fn should_loop(mut self, should_loop: bool) -> Self {
        self.should_loop = should_loop;
        self
    }

    pub fn flush_held_tail(mut self, flush: bool) -> Self {
        self.flush_held_tail = flush;
        self
    }

    pub fn channel(mut self, channel: Option<u8>) -> Self {
        self.channel = channel;
        self
    }

    pub fn velocity_zero_is_note_off(mut self, enabled: bool) -> Self {
        self.velocity_zero_is_note_off = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ConversionSettings::default();
        assert_eq!(settings.table_name, "song");
        assert!(settings.should_loop);
        assert!(!settings.flush_held_tail);
        assert_eq!(settings.channel, None);
        assert!(!settings.velocity_zero_is_note_off);
    }

    #[test]
    fn test_from_json_partial() {
        let settings =
            ConversionSettings::from_json(r#"{"tableName": "title_bgm", "shouldLoop": false}"#)
                .unwrap();
        assert_eq!(settings.table_name, "title_bgm");
        assert!(!settings.should_loop);
        assert!(!settings.flush_held_tail);
    }

    #[test]
    fn test_from_json_channel() {
        let settings = ConversionSettings::from_json(r#"{"channel": 9}"#).unwrap();
        assert_eq!(settings.channel, Some(9));
        assert_eq!(settings.table_name, "song");
    }

    #[test]
    fn test_from_json_channel_out_of_range() {
        let result = ConversionSettings::from_json(r#"{"channel": 16}"#);
        match result {
            Err(SongError::Settings(msg)) => assert!(msg.contains("channel 16")),
            other => panic!("expected settings error, got {:?}", other),
        }
        assert!(ConversionSettings::from_json(r#"{"channel": 15}"#).is_ok());
    }

    #[test]
    fn test_validate_builder_settings() {
        assert!(ConversionSettings::default().validate().is_ok());
        assert!(ConversionSettings::default().channel(Some(0)).validate().is_ok());
        assert!(ConversionSettings::default().channel(Some(200)).validate().is_err());
    }

    #[test]
    fn test_from_json_malformed() {
        let result = ConversionSettings::from_json("{ not json");
        assert!(matches!(result, Err(SongError::Settings(_))));
    }

    #[test]
    fn test_builder_chain() {
        let settings = ConversionSettings::default()
            .table_name("jingle")
            .should_loop(false)
            .flush_held_tail(true)
            .channel(Some(2))
            .velocity_zero_is_note_off(true);
        assert_eq!(settings.table_name, "jingle");
        assert!(!settings.should_loop);
        assert!(settings.flush_held_tail);
        assert_eq!(settings.channel, Some(2));
        assert!(settings.velocity_zero_is_note_off);
    }
}
