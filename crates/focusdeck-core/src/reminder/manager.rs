//! Reminder manager.
//!
//! Plays one audio cue per completed interval of a running session and keeps
//! the screen awake while reminders are armed.
//!
//! ## Watermark
//!
//! `last_mark` counts the intervals already announced. A cue fires only when
//! the current mark (`elapsed / interval`) moves past it, so a boundary is
//! never announced twice. Start, stop and enable snap the watermark to the
//! current mark; reset and mode change drop it to zero.
//!
//! ## Wake lock
//!
//! Acquisition is fire-and-forget. The provider answers synchronously or
//! later through [`ReminderManager::wake_lock_resolved`]. A handle that
//! arrives after the lock stopped being wanted is released right away.

use tracing::{debug, info, warn};

use super::alerts::{AlertCue, AlertSink};
use super::hooks::{ElapsedSource, LifecycleHooks};
use super::wake_lock::{WakeLockHandle, WakeLockProvider, WakeLockRequest};
use crate::error::EnvironmentError;

/// Ten minutes.
pub const DEFAULT_INTERVAL_SECS: u64 = 600;

#[derive(Debug, Default)]
struct WakeLockSlot {
    handle: Option<WakeLockHandle>,
    pending: bool,
    /// Enabled and not stopped since the last acquire.
    wanted: bool,
}

#[derive(Debug)]
pub struct ReminderManager<A, W> {
    enabled: bool,
    last_mark: u64,
    interval_secs: u64,
    alerts: A,
    wake_lock: W,
    slot: WakeLockSlot,
}

impl<A: AlertSink, W: WakeLockProvider> ReminderManager<A, W> {
    pub fn new(alerts: A, wake_lock: W) -> Self {
        Self::with_interval(alerts, wake_lock, DEFAULT_INTERVAL_SECS)
    }

    /// A zero interval is treated as one second.
    pub fn with_interval(alerts: A, wake_lock: W, interval_secs: u64) -> Self {
        Self {
            enabled: false,
            last_mark: 0,
            interval_secs: interval_secs.max(1),
            alerts,
            wake_lock,
            slot: WakeLockSlot::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_mark(&self) -> u64 {
        self.last_mark
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn wake_lock_handle(&self) -> Option<WakeLockHandle> {
        self.slot.handle
    }

    pub fn alerts(&self) -> &A {
        &self.alerts
    }

    pub fn wake_lock_provider(&self) -> &W {
        &self.wake_lock
    }

    // ── Toggle ───────────────────────────────────────────────────────

    /// Flip reminders on or off. Returns the new state.
    pub fn toggle(&mut self, elapsed: &dyn ElapsedSource) -> bool {
        if self.enabled {
            self.disable();
        } else {
            self.enable(elapsed);
        }
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool, elapsed: &dyn ElapsedSource) {
        if enabled != self.enabled {
            self.toggle(elapsed);
        }
    }

    fn enable(&mut self, elapsed: &dyn ElapsedSource) {
        self.enabled = true;
        self.last_mark = self.current_mark(elapsed);
        if let Err(e) = self.alerts.prime() {
            warn!("Alert audio could not be primed, reloading: {e}");
            self.alerts.reload();
        }
        self.acquire_wake_lock();
        info!(last_mark = self.last_mark, "Reminders enabled");
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.release_wake_lock();
        self.alerts.stop();
        info!("Reminders disabled");
    }

    // ── Wake lock ────────────────────────────────────────────────────

    /// Deliver the outcome of a pending wake-lock request.
    pub fn wake_lock_resolved(&mut self, result: Result<WakeLockHandle, EnvironmentError>) {
        self.slot.pending = false;
        match result {
            Ok(handle) if self.slot.wanted && self.slot.handle.is_none() => {
                debug!(handle = handle.id(), "Wake lock acquired");
                self.slot.handle = Some(handle);
            }
            Ok(handle) => {
                debug!(handle = handle.id(), "Wake lock no longer wanted, releasing");
                self.wake_lock.release(handle);
            }
            Err(e) => warn!("Wake lock request failed: {e}"),
        }
    }

    /// The host dropped the lock on its own (e.g. the page was hidden).
    pub fn wake_lock_lost(&mut self, handle: WakeLockHandle) {
        if self.slot.handle == Some(handle) {
            self.slot.handle = None;
            debug!(handle = handle.id(), "Wake lock released by environment");
        }
    }

    /// Re-request a lost lock once the surface is visible again.
    pub fn visibility_changed(&mut self, visible: bool) {
        if visible && self.enabled && self.slot.wanted && self.slot.handle.is_none() {
            debug!("Visible again, re-acquiring wake lock");
            self.acquire_wake_lock();
        }
    }

    fn acquire_wake_lock(&mut self) {
        self.slot.wanted = true;
        if self.slot.handle.is_some() || self.slot.pending {
            return;
        }
        self.slot.pending = true;
        match self.wake_lock.request() {
            WakeLockRequest::Pending => {}
            WakeLockRequest::Ready(result) => self.wake_lock_resolved(result),
        }
    }

    fn release_wake_lock(&mut self) {
        self.slot.wanted = false;
        if let Some(handle) = self.slot.handle.take() {
            debug!(handle = handle.id(), "Releasing wake lock");
            self.wake_lock.release(handle);
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn current_mark(&self, elapsed: &dyn ElapsedSource) -> u64 {
        elapsed.elapsed_seconds() / self.interval_secs
    }

    fn play(&mut self, cue: AlertCue) {
        if let Err(e) = self.alerts.play(cue) {
            warn!("Reminder sound could not play: {e}");
        }
    }
}

impl<A: AlertSink, W: WakeLockProvider> LifecycleHooks for ReminderManager<A, W> {
    fn on_timer_tick(&mut self, running: bool, elapsed: &dyn ElapsedSource) {
        if !self.enabled || !running {
            return;
        }
        if elapsed.elapsed_seconds() < self.interval_secs {
            return;
        }
        let mark = self.current_mark(elapsed);
        if mark > self.last_mark {
            self.last_mark = mark;
            let cue = AlertCue::for_mark(mark);
            info!(mark, %cue, "Reminder interval reached");
            self.play(cue);
        }
    }

    fn on_timer_start(&mut self, elapsed: &dyn ElapsedSource) {
        if !self.enabled {
            return;
        }
        self.last_mark = self.last_mark.max(self.current_mark(elapsed));
        self.acquire_wake_lock();
    }

    fn on_timer_stop(&mut self, elapsed: &dyn ElapsedSource) {
        if self.enabled {
            self.last_mark = self.current_mark(elapsed);
        }
        self.release_wake_lock();
    }

    fn on_reset(&mut self) {
        self.last_mark = 0;
        self.alerts.stop();
    }

    fn on_mode_change(&mut self) {
        self.last_mark = 0;
        self.alerts.stop();
        self.alerts.reload();
    }

    fn on_timer_complete(&mut self) {
        if self.enabled {
            self.play(AlertCue::Completion);
        }
    }
}
