use std::fmt;

use serde::{Deserialize, Serialize};

/// A YouTube video identifier: exactly 11 characters of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    pub const LEN: usize = 11;

    pub fn parse(candidate: &str) -> Option<Self> {
        if Self::is_valid(candidate) {
            Some(Self(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn is_valid(candidate: &str) -> bool {
        candidate.len() == Self::LEN && candidate.bytes().all(is_id_byte)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub(crate) fn is_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(format!("invalid video id: {value}"))
        }
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// A bundled audio file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTrack {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub audio_src: String,
}

/// A video hosted elsewhere, referenced by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTrack {
    pub video_id: VideoId,
    pub title: String,
    pub subtitle: String,
    /// Epoch milliseconds.
    pub added_at: i64,
}

pub const REMOTE_SUBTITLE: &str = "YouTube video";

impl RemoteTrack {
    pub fn new(video_id: VideoId, title: impl Into<String>, added_at: i64) -> Self {
        Self {
            video_id,
            title: title.into(),
            subtitle: REMOTE_SUBTITLE.to_string(),
            added_at,
        }
    }

    /// Remote ids equal the video id, so resubmitting the same video is
    /// detectable by equality.
    pub fn id(&self) -> &str {
        self.video_id.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Track {
    Local(LocalTrack),
    Remote(RemoteTrack),
}

impl Track {
    pub fn id(&self) -> &str {
        match self {
            Track::Local(t) => &t.id,
            Track::Remote(t) => t.id(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Track::Local(t) => &t.title,
            Track::Remote(t) => &t.title,
        }
    }

    pub fn subtitle(&self) -> &str {
        match self {
            Track::Local(t) => &t.subtitle,
            Track::Remote(t) => &t.subtitle,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Track::Remote(_))
    }

    pub fn as_remote(&self) -> Option<&RemoteTrack> {
        match self {
            Track::Remote(t) => Some(t),
            Track::Local(_) => None,
        }
    }
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("hz396", "396 Hz - Release Fear", "Deep relaxation and emotional cleansing"),
    ("hz369", "369 Hz - Tesla Sequence", "Ignites flow and creativity"),
    ("hz432", "432 Hz - Natural Harmony", "Realigns you with the rhythm of nature"),
    ("hz639", "639 Hz - Heart Connection", "Heart-centered harmony and compassion"),
    ("hz963", "963 Hz - Pure Consciousness", "Opens the doorway to intuition and awareness"),
    ("hz3", "3 Hz - Deep Delta", "Deep sleep and subconscious relaxation"),
    ("hz6", "6 Hz - Theta Rhythms", "Perfect for inspiration and visualization"),
    ("hz9", "9 Hz - Alpha Awakening", "Gentle energy and light focus"),
];

/// The bundled frequency tracks, in playlist order.
pub fn builtin_tracks() -> Vec<Track> {
    BUILTIN
        .iter()
        .map(|(id, title, subtitle)| {
            Track::Local(LocalTrack {
                id: (*id).to_string(),
                title: (*title).to_string(),
                subtitle: (*subtitle).to_string(),
                audio_src: format!("mp3/{id}.mp3"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_id_validation() {
        assert!(VideoId::is_valid("dQw4w9WgXcQ"));
        assert!(VideoId::is_valid("a-b_c-d_e-f"));
        assert!(!VideoId::is_valid("dQw4w9WgXc"));
        assert!(!VideoId::is_valid("dQw4w9WgXcQQ"));
        assert!(!VideoId::is_valid("dQw4w9WgX!Q"));
        assert!(!VideoId::is_valid("dQw4w9WgXé"));
    }

    #[test]
    fn builtin_ids_are_unique_and_local() {
        let tracks = builtin_tracks();
        assert_eq!(tracks.len(), 8);
        let mut ids: Vec<_> = tracks.iter().map(|t| t.id().to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert!(tracks.iter().all(|t| !t.is_remote()));
        match &tracks[0] {
            Track::Local(t) => assert_eq!(t.audio_src, "mp3/hz396.mp3"),
            other => panic!("Expected local track, got {other:?}"),
        }
    }

    #[test]
    fn track_serializes_with_type_tag() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let track = Track::Remote(RemoteTrack::new(id, "Song", 5));
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["type"], "remote");
        assert_eq!(json["video_id"], "dQw4w9WgXcQ");
        assert_eq!(track.id(), "dQw4w9WgXcQ");
    }
}
