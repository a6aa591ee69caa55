use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Countdown,
    Stopwatch,
    /// Wall-clock display. Never "running".
    Clock,
}

impl TimerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Countdown => "countdown",
            TimerMode::Stopwatch => "stopwatch",
            TimerMode::Clock => "clock",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "countdown" => Ok(TimerMode::Countdown),
            "stopwatch" => Ok(TimerMode::Stopwatch),
            "clock" => Ok(TimerMode::Clock),
            other => Err(format!("unknown timer mode: {other}")),
        }
    }
}

/// Countdown shortcuts offered next to the minute input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pomodoro" => Ok(Preset::Pomodoro),
            "short_break" | "short" => Ok(Preset::ShortBreak),
            "long_break" | "long" => Ok(Preset::LongBreak),
            other => Err(format!("unknown preset: {other}")),
        }
    }
}

/// Minutes assigned to each preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetMinutes {
    pub pomodoro: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl PresetMinutes {
    pub fn minutes_for(&self, preset: Preset) -> u32 {
        match preset {
            Preset::Pomodoro => self.pomodoro,
            Preset::ShortBreak => self.short_break,
            Preset::LongBreak => self.long_break,
        }
    }
}

impl Default for PresetMinutes {
    fn default() -> Self {
        Self {
            pomodoro: 25,
            short_break: 5,
            long_break: 15,
        }
    }
}
