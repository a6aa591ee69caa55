/// Read access to how far the current session has progressed.
pub trait ElapsedSource {
    fn elapsed_seconds(&self) -> u64;
}

impl ElapsedSource for u64 {
    fn elapsed_seconds(&self) -> u64 {
        *self
    }
}

/// Callbacks the timer engine fires at fixed points of its lifecycle.
///
/// The engine owns the counters, so it lends them to each hook that needs
/// the elapsed time instead of the hook holding a reference back.
pub trait LifecycleHooks {
    /// After every counted tick, and once right after `start`.
    fn on_timer_tick(&mut self, running: bool, elapsed: &dyn ElapsedSource);

    fn on_timer_start(&mut self, elapsed: &dyn ElapsedSource);

    /// On pause, on countdown completion, and when a running session is
    /// interrupted by reset or a mode switch.
    fn on_timer_stop(&mut self, elapsed: &dyn ElapsedSource);

    fn on_reset(&mut self);

    fn on_mode_change(&mut self);

    /// After a countdown reached zero and stopped.
    fn on_timer_complete(&mut self) {}
}

/// No reminders attached.
impl LifecycleHooks for () {
    fn on_timer_tick(&mut self, _running: bool, _elapsed: &dyn ElapsedSource) {}
    fn on_timer_start(&mut self, _elapsed: &dyn ElapsedSource) {}
    fn on_timer_stop(&mut self, _elapsed: &dyn ElapsedSource) {}
    fn on_reset(&mut self) {}
    fn on_mode_change(&mut self) {}
}
