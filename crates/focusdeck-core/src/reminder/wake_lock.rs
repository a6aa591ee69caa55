use serde::{Deserialize, Serialize};

use crate::error::EnvironmentError;

/// Opaque token for a held screen wake lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WakeLockHandle(u64);

impl WakeLockHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Immediate answer to a wake-lock request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WakeLockRequest {
    /// Outcome arrives later via `ReminderManager::wake_lock_resolved`.
    Pending,
    /// Provider settled synchronously.
    Ready(Result<WakeLockHandle, EnvironmentError>),
}

/// Host mechanism that keeps the display awake.
pub trait WakeLockProvider {
    fn request(&mut self) -> WakeLockRequest;

    fn release(&mut self, handle: WakeLockHandle);
}

/// Provider for hosts without any wake-lock support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWakeLock;

impl WakeLockProvider for NoWakeLock {
    fn request(&mut self) -> WakeLockRequest {
        WakeLockRequest::Ready(Err(EnvironmentError::WakeLockUnavailable(
            "no wake lock support on this host".into(),
        )))
    }

    fn release(&mut self, _handle: WakeLockHandle) {}
}
