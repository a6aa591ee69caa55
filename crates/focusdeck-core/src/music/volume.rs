//! Player volume with a mute toggle that remembers the last audible level.

use serde::Serialize;

use crate::storage::PlayerConfig;

/// Levels at or below this count as silent.
pub const SILENT_THRESHOLD: f64 = 0.001;

/// Level restored by unmuting when no audible level was ever set.
pub const FALLBACK_VOLUME: f64 = 0.5;

/// Icon bucket for the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeLevel {
    Off,
    Down,
    Up,
}

impl VolumeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "volume_off",
            Self::Down => "volume_down",
            Self::Up => "volume_up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerVolume {
    volume: f64,
    muted: bool,
    #[serde(skip)]
    previous: f64,
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl PlayerVolume {
    pub fn new(initial: f64) -> Self {
        let volume = clamp_unit(initial);
        Self {
            volume,
            muted: false,
            previous: volume,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        let mut player = Self::new(config.volume);
        player.muted = config.muted;
        player
    }

    /// Write the level and mute flag back for saving.
    pub fn apply_to(&self, config: &mut PlayerConfig) {
        config.volume = self.volume;
        config.muted = self.muted;
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// What the output should actually play at.
    pub fn effective(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn level(&self) -> VolumeLevel {
        if self.muted || self.volume <= SILENT_THRESHOLD {
            VolumeLevel::Off
        } else if self.volume < 0.5 {
            VolumeLevel::Down
        } else {
            VolumeLevel::Up
        }
    }

    /// Move the slider. Dragging to zero mutes; any audible level unmutes.
    pub fn set(&mut self, volume: f64) {
        self.volume = clamp_unit(volume);
        if self.volume <= SILENT_THRESHOLD {
            self.muted = true;
        } else {
            self.previous = self.volume;
            self.muted = false;
        }
    }

    /// Mute button. Returns whether the player is muted afterwards.
    pub fn toggle_mute(&mut self) -> bool {
        if self.muted || self.volume <= SILENT_THRESHOLD {
            self.muted = false;
            self.volume = if self.previous > SILENT_THRESHOLD {
                self.previous
            } else {
                FALLBACK_VOLUME
            };
        } else {
            self.previous = self.volume;
            self.muted = true;
        }
        self.muted
    }
}

impl Default for PlayerVolume {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}
