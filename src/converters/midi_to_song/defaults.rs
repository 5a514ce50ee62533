//! Default values for MIDI to song conversion

/// Table identifier used when none is configured
pub const DEFAULT_TABLE_NAME: &str = "song";

/// Duty cycle in effect before any modulation controller event (square wave)
pub const DEFAULT_DUTY_CYCLE_PCT: f64 = 0.5;

/// Largest duty cycle the modulation controller can select
pub const MAX_DUTY_CYCLE_PCT: f64 = 0.5;

/// MIDI controller number that drives the duty cycle (modulation wheel)
pub const MODULATION_CONTROLLER: u8 = 1;

/// Tempo assumed until the first tempo meta event (120 BPM)
pub const DEFAULT_TEMPO_US_PER_BEAT: u32 = 500_000;

/// Channel numbers run 0-15
pub const MIDI_CHANNEL_COUNT: u8 = 16;

/// Songs loop unless told otherwise
pub const DEFAULT_SHOULD_LOOP: bool = true;

/// Map a modulation controller value (0-127) onto a duty cycle in [0, 0.5]
pub fn duty_cycle_from_controller(value: u8) -> f64 {
    value as f64 / 127.0 * MAX_DUTY_CYCLE_PCT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_cycle_endpoints() {
        assert_eq!(duty_cycle_from_controller(0), 0.0);
        assert_eq!(duty_cycle_from_controller(127), 0.5);
    }

    #[test]
    fn test_duty_cycle_intermediate() {
        assert_eq!(duty_cycle_from_controller(64), 64.0 / 127.0 * 0.5);
        assert!(duty_cycle_from_controller(64) < 0.26);
        assert!(duty_cycle_from_controller(64) > 0.25);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_TABLE_NAME, "song");
        assert_eq!(DEFAULT_DUTY_CYCLE_PCT, 0.5);
        assert_eq!(MODULATION_CONTROLLER, 1);
        assert_eq!(DEFAULT_TEMPO_US_PER_BEAT, 500_000);
    }
}
