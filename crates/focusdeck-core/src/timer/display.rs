//! Rendering surface consumed by the timer engine.
//!
//! The engine never looks up UI elements. It pushes faces, labels and
//! control enablement into a [`TimerDisplay`] given at construction.

use std::fmt;
use std::time::Duration;

use chrono::{Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::mode::TimerMode;

/// How long the completion highlight stays on after a countdown ends.
pub const COMPLETION_FLASH: Duration = Duration::from_millis(1200);

/// Hours, minutes and seconds as shown on the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockFace {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockFace {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            hours: u64::from(time.hour()),
            minutes: time.minute() as u8,
            seconds: time.second() as u8,
        }
    }

    /// Zero-padded parts, two digits minimum each.
    pub fn parts(&self) -> (String, String, String) {
        (
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        )
    }
}

impl fmt::Display for ClockFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.parts();
        write!(f, "{h}:{m}:{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleLabel {
    Start,
    Pause,
}

impl ToggleLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleLabel::Start => "Start",
            ToggleLabel::Pause => "Pause",
        }
    }
}

/// Which controls accept input in the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub toggle_enabled: bool,
    pub reset_enabled: bool,
    pub minutes_input_enabled: bool,
    pub presets_enabled: bool,
    pub clock_mode: bool,
}

impl ControlState {
    pub fn for_mode(mode: TimerMode) -> Self {
        let is_countdown = mode == TimerMode::Countdown;
        let is_clock = mode == TimerMode::Clock;
        Self {
            toggle_enabled: !is_clock,
            reset_enabled: !is_clock,
            minutes_input_enabled: is_countdown,
            presets_enabled: is_countdown,
            clock_mode: is_clock,
        }
    }
}

pub trait TimerDisplay {
    fn render(&mut self, face: &ClockFace);

    fn set_toggle_label(&mut self, label: ToggleLabel);

    fn apply_controls(&mut self, controls: &ControlState);

    /// Mirror the accepted countdown length back into the minute field.
    fn set_minutes_input(&mut self, _minutes: u32) {}

    /// Raise the completion highlight; the surface clears it after `hold`.
    fn flash_completion(&mut self, _hold: Duration) {}
}

/// Display that draws nothing, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl TimerDisplay for NullDisplay {
    fn render(&mut self, _face: &ClockFace) {}
    fn set_toggle_label(&mut self, _label: ToggleLabel) {}
    fn apply_controls(&mut self, _controls: &ControlState) {}
}

/// Source of local wall-clock time for clock mode.
pub trait WallClock {
    fn now(&self) -> NaiveTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}
