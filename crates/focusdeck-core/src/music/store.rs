//! Persistence for user-added remote tracks.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::track::{RemoteTrack, Track, VideoId};
use crate::error::StorageError;
use crate::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "focus-player-youtube-tracks";

/// On-disk shape of one remote track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTrack {
    id: String,
    video_id: String,
    title: String,
    added_at: i64,
}

pub struct TrackStore<S> {
    backend: S,
}

impl<S: KeyValueStore> TrackStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the stored remote tracks.
    ///
    /// Never fails: unreadable or malformed content yields an empty list and
    /// a warning, and individual bad entries are skipped.
    pub fn load(&self) -> Vec<RemoteTrack> {
        let raw = match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored tracks");
                return Vec::new();
            }
        };

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Stored track parsing failed");
                return Vec::new();
            }
        };

        let Value::Array(items) = parsed else {
            tracing::warn!("Stored tracks are not a list, ignoring");
            return Vec::new();
        };

        items.iter().filter_map(track_from_value).collect()
    }

    /// Persist the remote entries of `tracks`. Local tracks are skipped.
    ///
    /// # Errors
    /// Returns an error if serialization or the backend write fails.
    pub fn save<'a, I>(&mut self, tracks: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = &'a Track>,
    {
        let payload: Vec<StoredTrack> = tracks
            .into_iter()
            .filter_map(Track::as_remote)
            .map(|t| StoredTrack {
                id: t.id().to_string(),
                video_id: t.video_id.to_string(),
                title: t.title.clone(),
                added_at: t.added_at,
            })
            .collect();
        let json = serde_json::to_string(&payload)?;
        self.backend.set(STORAGE_KEY, &json)
    }

    /// Remove every stored track.
    ///
    /// # Errors
    /// Returns an error if the backend write fails.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.backend.remove(STORAGE_KEY)
    }
}

fn track_from_value(item: &Value) -> Option<RemoteTrack> {
    let obj = item.as_object()?;
    let raw_id = obj
        .get("videoId")
        .and_then(Value::as_str)
        .or_else(|| obj.get("id").and_then(Value::as_str))?;
    let video_id = VideoId::parse(raw_id)?;

    let title = match obj.get("title").and_then(Value::as_str) {
        Some(title) => title.to_string(),
        None => format!("YouTube Track {video_id}"),
    };
    let added_at = obj
        .get("addedAt")
        .and_then(Value::as_f64)
        .map(|ms| ms as i64)
        .unwrap_or_else(|| Utc::now().timestamp_millis());

    Some(RemoteTrack::new(video_id, title, added_at))
}
