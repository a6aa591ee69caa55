//! Timer engine implementation.
//!
//! The engine is a mode state machine over countdown, stopwatch and clock.
//! It does not use internal threads - the caller drives it by calling
//! `tick()` once per second.
//!
//! ## Tick schedule
//!
//! ```text
//! stopped --start--> session --pause/complete/reset--> stopped
//! any --switch_mode(clock)--> clock --switch_mode(other)--> stopped
//! ```
//!
//! Every change of schedule bumps `schedule_epoch()`. A driver re-arms its
//! one-second interval when the epoch moves, mirroring a cancelled and
//! re-created repeating timer. `tick()` while stopped does nothing, so a
//! cancelled schedule never produces a stale tick.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(display, reminders, 25);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::CountdownCompleted) when the countdown ends
//! ```

use chrono::Utc;
use tracing::debug;

use super::display::{
    ClockFace, ControlState, SystemClock, TimerDisplay, ToggleLabel, WallClock, COMPLETION_FLASH,
};
use super::mode::{Preset, PresetMinutes, TimerMode};
use super::state::{clamp_countdown_minutes, TimerState};
use crate::events::Event;
use crate::reminder::{AlertSink, LifecycleHooks, ReminderManager, WakeLockProvider};

/// Which repeating tick is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSchedule {
    Stopped,
    /// Counting countdown or stopwatch seconds.
    Session,
    /// Display-only wall-clock refresh.
    Clock,
}

pub struct TimerEngine<D, H> {
    state: TimerState,
    schedule: TickSchedule,
    schedule_epoch: u64,
    presets: PresetMinutes,
    display: D,
    hooks: H,
    clock: Box<dyn WallClock>,
}

impl<D: TimerDisplay, H: LifecycleHooks> TimerEngine<D, H> {
    /// Create an engine in countdown mode with `countdown_minutes` on the face.
    ///
    /// The minutes are clamped to the accepted range.
    pub fn new(display: D, hooks: H, countdown_minutes: u32) -> Self {
        let minutes = clamp_countdown_minutes(f64::from(countdown_minutes))
            .unwrap_or(super::state::DEFAULT_COUNTDOWN_MINUTES);
        let mut engine = Self {
            state: TimerState::new(minutes),
            schedule: TickSchedule::Stopped,
            schedule_epoch: 0,
            presets: PresetMinutes::default(),
            display,
            hooks,
            clock: Box::new(SystemClock),
        };
        engine.display.set_minutes_input(minutes);
        engine.apply_mode_ui();
        engine.render();
        engine
    }

    pub fn with_presets(mut self, presets: PresetMinutes) -> Self {
        self.presets = presets;
        self
    }

    pub fn with_wall_clock(mut self, clock: impl WallClock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.state.elapsed_secs()
    }

    pub fn schedule(&self) -> TickSchedule {
        self.schedule
    }

    pub fn schedule_epoch(&self) -> u64 {
        self.schedule_epoch
    }

    pub fn presets(&self) -> PresetMinutes {
        self.presets
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state.clone(),
            elapsed_secs: self.state.elapsed_secs(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state.mode == TimerMode::Clock || self.state.running {
            return None;
        }
        if self.state.mode == TimerMode::Countdown && self.state.countdown_remaining_secs == 0 {
            // A finished countdown starts a fresh session.
            self.state.countdown_remaining_secs = self.state.countdown_total_secs;
            self.hooks.on_reset();
        }

        self.state.running = true;
        self.display.set_toggle_label(ToggleLabel::Pause);
        self.hooks.on_timer_start(&self.state);
        self.hooks.on_timer_tick(true, &self.state);
        self.arm(TickSchedule::Session);

        debug!(mode = %self.state.mode, elapsed = self.state.elapsed_secs(), "Timer started");
        Some(Event::TimerStarted {
            mode: self.state.mode,
            elapsed_secs: self.state.elapsed_secs(),
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.stop_ticking(false);
        self.hooks.on_timer_stop(&self.state);

        debug!(mode = %self.state.mode, elapsed = self.state.elapsed_secs(), "Timer paused");
        Some(Event::TimerPaused {
            mode: self.state.mode,
            elapsed_secs: self.state.elapsed_secs(),
            at: Utc::now(),
        })
    }

    /// Start/pause button.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.state.mode == TimerMode::Clock {
            return None;
        }
        if self.state.running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        if self.state.mode == TimerMode::Clock {
            self.render();
            return None;
        }
        let was_running = self.state.running;
        self.stop_ticking(false);
        if was_running {
            self.hooks.on_timer_stop(&self.state);
        }

        match self.state.mode {
            TimerMode::Countdown => {
                self.state.countdown_remaining_secs = self.state.countdown_total_secs;
            }
            TimerMode::Stopwatch => self.state.stopwatch_elapsed_secs = 0,
            TimerMode::Clock => {}
        }
        self.render();
        self.hooks.on_reset();

        debug!(mode = %self.state.mode, "Timer reset");
        Some(Event::TimerReset {
            mode: self.state.mode,
            at: Utc::now(),
        })
    }

    pub fn switch_mode(&mut self, new_mode: TimerMode) -> Option<Event> {
        let from = self.state.mode;
        if new_mode == from {
            return None;
        }

        let was_running = self.state.running;
        self.stop_ticking(true);
        if was_running {
            self.hooks.on_timer_stop(&self.state);
        }

        self.state.mode = new_mode;
        match new_mode {
            TimerMode::Countdown => {
                self.state.countdown_remaining_secs = self.state.countdown_total_secs;
            }
            TimerMode::Stopwatch => self.state.stopwatch_elapsed_secs = 0,
            TimerMode::Clock => self.arm(TickSchedule::Clock),
        }

        self.hooks.on_mode_change();
        self.apply_mode_ui();
        self.render();

        debug!(%from, to = %new_mode, "Timer mode switched");
        Some(Event::ModeSwitched {
            from,
            to: new_mode,
            at: Utc::now(),
        })
    }

    /// Change the countdown length. NaN is ignored, other values are
    /// clamped to 1..=999 minutes. Only meaningful in countdown mode.
    pub fn set_countdown_minutes(&mut self, minutes: f64) -> Option<Event> {
        if self.state.mode != TimerMode::Countdown {
            return None;
        }
        let minutes = clamp_countdown_minutes(minutes)?;

        self.state.countdown_total_secs = u64::from(minutes) * 60;
        self.state.countdown_remaining_secs = self.state.countdown_total_secs;
        self.display.set_minutes_input(minutes);
        self.render();
        self.hooks.on_reset();

        debug!(minutes, "Countdown length set");
        Some(Event::CountdownMinutesSet {
            minutes,
            total_secs: self.state.countdown_total_secs,
            at: Utc::now(),
        })
    }

    pub fn apply_preset(&mut self, preset: Preset) -> Option<Event> {
        let minutes = self.presets.minutes_for(preset);
        self.set_countdown_minutes(f64::from(minutes))
    }

    /// Call once per second. Returns `Some(Event::CountdownCompleted)` when
    /// the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        match self.schedule {
            TickSchedule::Stopped => return None,
            TickSchedule::Clock => {
                self.render();
                return None;
            }
            TickSchedule::Session => {}
        }

        match self.state.mode {
            TimerMode::Countdown => {
                if self.state.countdown_remaining_secs > 0 {
                    self.state.countdown_remaining_secs -= 1;
                    if self.state.countdown_remaining_secs == 0 {
                        self.render();
                        return self.complete_countdown();
                    }
                }
            }
            TimerMode::Stopwatch => {
                self.state.stopwatch_elapsed_secs = self.state.stopwatch_elapsed_secs.saturating_add(1);
            }
            TimerMode::Clock => return None,
        }
        self.render();
        self.hooks.on_timer_tick(self.state.running, &self.state);
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_countdown(&mut self) -> Option<Event> {
        self.stop_ticking(false);
        self.hooks.on_timer_stop(&self.state);
        self.display.flash_completion(COMPLETION_FLASH);
        self.hooks.on_timer_complete();

        debug!(total = self.state.countdown_total_secs, "Countdown completed");
        Some(Event::CountdownCompleted {
            total_secs: self.state.countdown_total_secs,
            at: Utc::now(),
        })
    }

    fn arm(&mut self, schedule: TickSchedule) {
        self.schedule = schedule;
        self.schedule_epoch += 1;
    }

    fn stop_ticking(&mut self, keep_label: bool) {
        if self.schedule != TickSchedule::Stopped {
            self.arm(TickSchedule::Stopped);
        }
        self.state.running = false;
        if !keep_label {
            self.display.set_toggle_label(ToggleLabel::Start);
        }
    }

    fn apply_mode_ui(&mut self) {
        self.display.apply_controls(&ControlState::for_mode(self.state.mode));
        let label = if self.state.running {
            ToggleLabel::Pause
        } else {
            ToggleLabel::Start
        };
        self.display.set_toggle_label(label);
    }

    fn render(&mut self) {
        let face = match self.state.display_secs() {
            Some(secs) => ClockFace::from_seconds(secs),
            None => ClockFace::from_time(self.clock.now()),
        };
        self.display.render(&face);
    }
}

impl<D, A, W> TimerEngine<D, ReminderManager<A, W>>
where
    D: TimerDisplay,
    A: AlertSink,
    W: WakeLockProvider,
{
    /// Reminder toggle control. Returns whether reminders are now enabled.
    pub fn toggle_reminders(&mut self) -> bool {
        self.hooks.toggle(&self.state)
    }

    pub fn reminders(&self) -> &ReminderManager<A, W> {
        &self.hooks
    }

    pub fn reminders_mut(&mut self) -> &mut ReminderManager<A, W> {
        &mut self.hooks
    }
}
