//! # Focusdeck Core Library
//!
//! Core logic for a focus widget: a three-mode timer, interval reminders that
//! ride on the timer's lifecycle, and a small music playlist that accepts
//! YouTube links.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a caller-driven state machine. The host invokes
//!   `tick()` once per second while [`TimerEngine::schedule`] asks for it.
//! - **Reminders**: [`ReminderManager`] implements the engine's lifecycle
//!   hooks, plays alert cues at fixed elapsed-time marks and holds a
//!   screen wake lock while enabled.
//! - **Music**: link resolution, remote track persistence and the playlist.
//! - **Storage**: SQLite key-value blobs and TOML configuration.
//!
//! Presentation, audio output and wake locks are traits implemented by the
//! host, so everything here runs headless in tests.

pub mod error;
pub mod events;
pub mod music;
pub mod reminder;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, EnvironmentError, StorageError, ValidationError};
pub use events::Event;
pub use music::{
    create_remote_track, extract_video_id, MusicLibrary, PlayerVolume, Playlist, Track, TrackStore,
};
pub use reminder::{AlertCue, AlertSink, LifecycleHooks, ReminderManager, WakeLockProvider};
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
pub use timer::{TimerDisplay, TimerEngine, TimerMode, TimerState};
