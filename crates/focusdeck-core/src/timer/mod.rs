mod display;
mod engine;
mod mode;
mod state;

pub use display::{
    ClockFace, ControlState, NullDisplay, SystemClock, TimerDisplay, ToggleLabel, WallClock,
    COMPLETION_FLASH,
};
pub use engine::{TickSchedule, TimerEngine};
pub use mode::{Preset, PresetMinutes, TimerMode};
pub use state::{
    clamp_countdown_minutes, initial_countdown_minutes, parse_minutes_input, TimerState,
    DEFAULT_COUNTDOWN_MINUTES, MAX_COUNTDOWN_MINUTES, MIN_COUNTDOWN_MINUTES,
};
