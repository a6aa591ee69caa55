use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EnvironmentError;

/// Sound played by the reminder subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCue {
    /// First completed interval of a session.
    FirstInterval,
    /// Every later interval.
    SubsequentInterval,
    /// Countdown finished.
    Completion,
}

impl AlertCue {
    pub fn for_mark(mark: u64) -> Self {
        if mark == 1 {
            AlertCue::FirstInterval
        } else {
            AlertCue::SubsequentInterval
        }
    }
}

impl fmt::Display for AlertCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertCue::FirstInterval => "first_interval",
            AlertCue::SubsequentInterval => "subsequent_interval",
            AlertCue::Completion => "completion",
        };
        f.write_str(name)
    }
}

/// Audio output for reminder cues. Owned by the reminder manager only.
///
/// `play` only starts playback; the host finishes it on its own.
pub trait AlertSink {
    fn play(&mut self, cue: AlertCue) -> Result<(), EnvironmentError>;

    /// Stop and rewind anything in flight.
    fn stop(&mut self);

    /// Drop and recreate the underlying audio resources.
    fn reload(&mut self) {}

    /// Unlock playback ahead of time (hosts that gate audio on a gesture).
    fn prime(&mut self) -> Result<(), EnvironmentError> {
        Ok(())
    }
}

/// Sink that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAlerts;

impl AlertSink for SilentAlerts {
    fn play(&mut self, _cue: AlertCue) -> Result<(), EnvironmentError> {
        Ok(())
    }

    fn stop(&mut self) {}
}
