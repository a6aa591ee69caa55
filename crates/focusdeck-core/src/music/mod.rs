mod playlist;
mod resolver;
mod store;
mod track;
mod volume;

pub use playlist::{AddOutcome, MusicLibrary, Playlist};
pub use resolver::{create_remote_track, extract_video_id};
pub use store::{TrackStore, STORAGE_KEY};
pub use track::{builtin_tracks, LocalTrack, RemoteTrack, Track, VideoId, REMOTE_SUBTITLE};
pub use volume::{PlayerVolume, VolumeLevel, FALLBACK_VOLUME, SILENT_THRESHOLD};
