//! Host capabilities for running the timer in a terminal.
//!
//! The face is redrawn in place on stdout, alert cues ring the terminal
//! bell, and the wake lock is an idle inhibitor held by a
//! `systemd-inhibit` child process.

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use focusdeck_core::error::EnvironmentError;
use focusdeck_core::reminder::{
    AlertCue, AlertSink, WakeLockHandle, WakeLockProvider, WakeLockRequest,
};
use focusdeck_core::storage::AudioConfig;
use focusdeck_core::timer::{ClockFace, ControlState, TimerDisplay, ToggleLabel};
use tokio::process::Command;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Redraws one status line.
pub struct TerminalDisplay {
    face: String,
    label: ToggleLabel,
    controls: Option<ControlState>,
    minutes: u32,
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            face: String::new(),
            label: ToggleLabel::Start,
            controls: None,
            minutes: 0,
        }
    }

    fn status_line(&self) -> String {
        let mut line = format!("{}  [{}]", self.face, self.label.as_str());
        if let Some(controls) = &self.controls {
            if controls.minutes_input_enabled {
                line.push_str(&format!("  {} min", self.minutes));
            }
            if controls.clock_mode {
                line.push_str("  clock");
            }
        }
        line
    }

    fn redraw(&self) {
        let mut out = std::io::stdout().lock();
        // Status redraws are best effort.
        let _ = write!(out, "\r\x1b[2K{}", self.status_line());
        let _ = out.flush();
    }
}

impl TimerDisplay for TerminalDisplay {
    fn render(&mut self, face: &ClockFace) {
        self.face = face.to_string();
        self.redraw();
    }

    fn set_toggle_label(&mut self, label: ToggleLabel) {
        self.label = label;
        self.redraw();
    }

    fn apply_controls(&mut self, controls: &ControlState) {
        self.controls = Some(*controls);
    }

    fn set_minutes_input(&mut self, minutes: u32) {
        self.minutes = minutes;
    }

    fn flash_completion(&mut self, _duration: Duration) {
        println!("\r\x1b[2K{}  time is up", self.face);
    }
}

/// Rings the terminal bell and logs which sound would play.
pub struct TerminalAlerts {
    sources: AudioConfig,
    ringing: Option<AlertCue>,
}

impl TerminalAlerts {
    pub fn new(sources: AudioConfig) -> Self {
        Self {
            sources,
            ringing: None,
        }
    }

    fn source_for(&self, cue: AlertCue) -> &str {
        match cue {
            AlertCue::FirstInterval => &self.sources.first_interval_sound,
            AlertCue::SubsequentInterval => &self.sources.subsequent_interval_sound,
            AlertCue::Completion => &self.sources.completion_sound,
        }
    }
}

impl AlertSink for TerminalAlerts {
    fn play(&mut self, cue: AlertCue) -> Result<(), EnvironmentError> {
        let mut out = std::io::stdout().lock();
        out.write_all(b"\x07")
            .and_then(|()| out.flush())
            .map_err(|e| EnvironmentError::PlaybackBlocked(e.to_string()))?;
        info!(%cue, source = self.source_for(cue), volume = self.sources.volume, "Alert");
        self.ringing = Some(cue);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(cue) = self.ringing.take() {
            debug!(%cue, "Alert stopped");
        }
    }
}

/// Outcome of background wake-lock work, fed back into the reminder manager.
#[derive(Debug)]
pub enum WakeLockEvent {
    Resolved(Result<WakeLockHandle, EnvironmentError>),
    Lost(WakeLockHandle),
}

/// How long a fresh inhibitor must stay alive to count as acquired.
const SETTLE: Duration = Duration::from_millis(250);

const INHIBIT_ARGS: [&str; 6] = [
    "--what=idle",
    "--who=focusdeck",
    "--why=Focus reminders are enabled",
    "--mode=block",
    "sleep",
    "infinity",
];

/// Wake lock backed by `systemd-inhibit --what=idle`.
pub struct InhibitWakeLock {
    program: String,
    args: Vec<String>,
    next_id: u64,
    /// Release channels of inhibitor tasks. A closed sender means the task
    /// has already ended.
    held: HashMap<u64, oneshot::Sender<()>>,
    events: mpsc::UnboundedSender<WakeLockEvent>,
}

impl InhibitWakeLock {
    pub fn new(events: mpsc::UnboundedSender<WakeLockEvent>) -> Self {
        Self::with_command(events, "systemd-inhibit", &INHIBIT_ARGS)
    }

    /// Hold the lock by keeping `program args..` alive.
    pub fn with_command(
        events: mpsc::UnboundedSender<WakeLockEvent>,
        program: &str,
        args: &[&str],
    ) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            next_id: 0,
            held: HashMap::new(),
            events,
        }
    }

    fn prune_finished(&mut self) {
        self.held.retain(|_, release| !release.is_closed());
    }
}

impl WakeLockProvider for InhibitWakeLock {
    fn request(&mut self) -> WakeLockRequest {
        self.prune_finished();
        self.next_id += 1;
        let handle = WakeLockHandle::new(self.next_id);

        let spawned = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                return WakeLockRequest::Ready(Err(EnvironmentError::WakeLockUnavailable(
                    format!("{}: {e}", self.program),
                )))
            }
        };

        let (release_tx, mut release_rx) = oneshot::channel();
        self.held.insert(handle.id(), release_tx);
        let events = self.events.clone();

        tokio::spawn(async move {
            match tokio::time::timeout(SETTLE, child.wait()).await {
                Ok(status) => {
                    let reason = match status {
                        Ok(status) => format!("inhibitor exited with {status}"),
                        Err(e) => e.to_string(),
                    };
                    let _ = events.send(WakeLockEvent::Resolved(Err(
                        EnvironmentError::WakeLockUnavailable(reason),
                    )));
                    return;
                }
                Err(_) => {
                    let _ = events.send(WakeLockEvent::Resolved(Ok(handle)));
                }
            }

            tokio::select! {
                _ = &mut release_rx => {
                    if let Err(e) = child.kill().await {
                        warn!("Failed to stop inhibitor: {e}");
                    }
                }
                _ = child.wait() => {
                    let _ = events.send(WakeLockEvent::Lost(handle));
                }
            }
        });

        WakeLockRequest::Pending
    }

    fn release(&mut self, handle: WakeLockHandle) {
        if let Some(release) = self.held.remove(&handle.id()) {
            let _ = release.send(());
        }
        self.prune_finished();
    }
}
