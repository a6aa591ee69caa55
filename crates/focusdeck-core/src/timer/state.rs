use serde::{Deserialize, Serialize};

use super::mode::TimerMode;
use crate::error::ValidationError;
use crate::reminder::ElapsedSource;

pub const DEFAULT_COUNTDOWN_MINUTES: u32 = 25;
pub const MIN_COUNTDOWN_MINUTES: u32 = 1;
pub const MAX_COUNTDOWN_MINUTES: u32 = 999;

/// Counters and mode of a single timer widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: TimerMode,
    pub countdown_total_secs: u64,
    /// Always within `0..=countdown_total_secs`.
    pub countdown_remaining_secs: u64,
    pub stopwatch_elapsed_secs: u64,
    pub running: bool,
}

impl TimerState {
    pub fn new(countdown_minutes: u32) -> Self {
        let total = u64::from(countdown_minutes) * 60;
        Self {
            mode: TimerMode::Countdown,
            countdown_total_secs: total,
            countdown_remaining_secs: total,
            stopwatch_elapsed_secs: 0,
            running: false,
        }
    }

    /// Seconds of progress in the current session.
    pub fn elapsed_secs(&self) -> u64 {
        match self.mode {
            TimerMode::Countdown => self
                .countdown_total_secs
                .saturating_sub(self.countdown_remaining_secs),
            TimerMode::Stopwatch => self.stopwatch_elapsed_secs,
            TimerMode::Clock => 0,
        }
    }

    /// Seconds shown on the face, `None` in clock mode.
    pub fn display_secs(&self) -> Option<u64> {
        match self.mode {
            TimerMode::Countdown => Some(self.countdown_remaining_secs),
            TimerMode::Stopwatch => Some(self.stopwatch_elapsed_secs),
            TimerMode::Clock => None,
        }
    }

    pub fn countdown_minutes(&self) -> u32 {
        (self.countdown_total_secs / 60) as u32
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_MINUTES)
    }
}

impl ElapsedSource for TimerState {
    fn elapsed_seconds(&self) -> u64 {
        self.elapsed_secs()
    }
}

/// Minutes to start with, taken from a pre-filled input value.
///
/// Anything that is not a number of at least one minute falls back to the
/// default; larger values are rounded and capped.
pub fn initial_countdown_minutes(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(n) if n >= 1.0 => n.round().min(MAX_COUNTDOWN_MINUTES as f64) as u32,
        _ => DEFAULT_COUNTDOWN_MINUTES,
    }
}

/// Parse a minute field edit. Range clamping happens in the engine.
pub fn parse_minutes_input(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if !n.is_nan() => Ok(n),
        _ => Err(ValidationError::InvalidMinutes {
            input: trimmed.to_string(),
        }),
    }
}

/// Clamp to the accepted minute range. `None` for NaN.
pub fn clamp_countdown_minutes(minutes: f64) -> Option<u32> {
    if minutes.is_nan() {
        return None;
    }
    let clamped = minutes.clamp(MIN_COUNTDOWN_MINUTES as f64, MAX_COUNTDOWN_MINUTES as f64);
    Some(clamped.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_twenty_five_minute_countdown() {
        let state = TimerState::default();
        assert_eq!(state.mode, TimerMode::Countdown);
        assert_eq!(state.countdown_total_secs, 1500);
        assert_eq!(state.countdown_remaining_secs, 1500);
        assert!(!state.running);
    }

    #[test]
    fn elapsed_depends_on_mode() {
        let mut state = TimerState::new(10);
        state.countdown_remaining_secs = 450;
        assert_eq!(state.elapsed_secs(), 150);

        state.mode = TimerMode::Stopwatch;
        state.stopwatch_elapsed_secs = 42;
        assert_eq!(state.elapsed_secs(), 42);

        state.mode = TimerMode::Clock;
        assert_eq!(state.elapsed_secs(), 0);
        assert_eq!(state.display_secs(), None);
    }

    #[test]
    fn initial_minutes_fallbacks() {
        assert_eq!(initial_countdown_minutes("45"), 45);
        assert_eq!(initial_countdown_minutes("12.6"), 13);
        assert_eq!(initial_countdown_minutes("5000"), 999);
        assert_eq!(initial_countdown_minutes("0"), 25);
        assert_eq!(initial_countdown_minutes("soon"), 25);
        assert_eq!(initial_countdown_minutes(""), 25);
    }

    #[test]
    fn minutes_input_rejects_non_numbers() {
        assert_eq!(parse_minutes_input(" 30 "), Ok(30.0));
        assert!(parse_minutes_input("NaN").is_err());
        let err = parse_minutes_input("ten").unwrap_err();
        assert_eq!(err.code(), "INVALID_MINUTES");
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_countdown_minutes(0.0), Some(1));
        assert_eq!(clamp_countdown_minutes(-20.0), Some(1));
        assert_eq!(clamp_countdown_minutes(1000.0), Some(999));
        assert_eq!(clamp_countdown_minutes(f64::INFINITY), Some(999));
        assert_eq!(clamp_countdown_minutes(f64::NAN), None);
    }
}
