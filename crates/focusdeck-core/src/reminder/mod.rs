mod alerts;
mod hooks;
mod manager;
mod wake_lock;

pub use alerts::{AlertCue, AlertSink, SilentAlerts};
pub use hooks::{ElapsedSource, LifecycleHooks};
pub use manager::{ReminderManager, DEFAULT_INTERVAL_SECS};
pub use wake_lock::{NoWakeLock, WakeLockHandle, WakeLockProvider, WakeLockRequest};
