use super::resolver::create_remote_track;
use super::store::TrackStore;
use super::track::{builtin_tracks, RemoteTrack, Track};
use crate::error::ValidationError;
use crate::storage::KeyValueStore;

/// Result of adding a track to the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(usize),
    /// A track with the same id already exists at this index.
    Duplicate(usize),
}

impl AddOutcome {
    pub fn index(self) -> usize {
        match self {
            AddOutcome::Added(i) | AddOutcome::Duplicate(i) => i,
        }
    }
}

/// Ordered track list with a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: usize,
}

impl Playlist {
    /// Built-in tracks followed by `remote`, skipping duplicate ids.
    pub fn new(remote: impl IntoIterator<Item = RemoteTrack>) -> Self {
        let mut playlist = Self {
            tracks: builtin_tracks(),
            current: 0,
        };
        for track in remote {
            playlist.add(Track::Remote(track));
        }
        playlist
    }

    pub fn add(&mut self, track: Track) -> AddOutcome {
        if let Some(index) = self.position(track.id()) {
            return AddOutcome::Duplicate(index);
        }
        self.tracks.push(track);
        AddOutcome::Added(self.tracks.len() - 1)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id() == id)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn remote_tracks(&self) -> impl Iterator<Item = &RemoteTrack> {
        self.tracks.iter().filter_map(Track::as_remote)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    /// Move the cursor to `index`, wrapping out-of-range values.
    pub fn select(&mut self, index: usize) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = index % self.tracks.len();
        self.current()
    }

    pub fn next(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.tracks.len();
        self.current()
    }

    pub fn previous(&mut self) -> Option<&Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let len = self.tracks.len();
        self.current = (self.current + len - 1) % len;
        self.current()
    }
}

/// Playlist plus the store that backs its remote entries.
pub struct MusicLibrary<S> {
    store: TrackStore<S>,
    playlist: Playlist,
}

impl<S: KeyValueStore> MusicLibrary<S> {
    pub fn open(backend: S) -> Self {
        let store = TrackStore::new(backend);
        let playlist = Playlist::new(store.load());
        Self { store, playlist }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn playlist_mut(&mut self) -> &mut Playlist {
        &mut self.playlist
    }

    pub fn store(&self) -> &TrackStore<S> {
        &self.store
    }

    /// Validate form input, add the track and persist the remote list.
    ///
    /// A duplicate selects the existing entry without touching storage. A
    /// storage failure is logged and the track stays in the session.
    ///
    /// # Errors
    /// Returns a validation error for a blank title or unresolvable URL.
    pub fn submit(&mut self, title: &str, url: &str) -> Result<AddOutcome, ValidationError> {
        let track = create_remote_track(title, url)?;
        let outcome = self.playlist.add(Track::Remote(track));
        match outcome {
            AddOutcome::Added(index) => {
                tracing::info!(index, "Added remote track");
                if let Err(e) = self.store.save(self.playlist.tracks()) {
                    tracing::warn!(error = %e, "Unable to persist tracks");
                }
            }
            AddOutcome::Duplicate(index) => {
                tracing::debug!(index, "Track already in playlist");
            }
        }
        self.playlist.select(outcome.index());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::music::track::VideoId;
    use crate::storage::MemoryStore;

    fn remote(id: &str) -> RemoteTrack {
        RemoteTrack::new(VideoId::parse(id).unwrap(), "Song", 1)
    }

    #[test]
    fn new_playlist_starts_with_builtins() {
        let playlist = Playlist::new([remote("dQw4w9WgXcQ")]);
        assert_eq!(playlist.len(), 9);
        assert_eq!(playlist.current().unwrap().id(), "hz396");
        assert_eq!(playlist.remote_tracks().count(), 1);
    }

    #[test]
    fn stored_duplicates_collapse() {
        let playlist = Playlist::new([remote("dQw4w9WgXcQ"), remote("dQw4w9WgXcQ")]);
        assert_eq!(playlist.len(), 9);
    }

    #[test]
    fn add_detects_duplicates() {
        let mut playlist = Playlist::new([]);
        assert_eq!(playlist.add(Track::Remote(remote("dQw4w9WgXcQ"))), AddOutcome::Added(8));
        assert_eq!(playlist.add(Track::Remote(remote("dQw4w9WgXcQ"))), AddOutcome::Duplicate(8));
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut playlist = Playlist::new([]);
        assert_eq!(playlist.previous().unwrap().id(), "hz9");
        assert_eq!(playlist.next().unwrap().id(), "hz396");
        assert_eq!(playlist.select(9).unwrap().id(), "hz369");
    }

    #[test]
    fn submit_persists_new_tracks() {
        let mut library = MusicLibrary::open(MemoryStore::new());
        let outcome = library
            .submit("Song", "https://youtu.be/dQw4w9WgXcQ")
            .unwrap();
        assert_eq!(outcome, AddOutcome::Added(8));
        assert_eq!(library.playlist().current_index(), 8);

        let stored = library.store().load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id(), "dQw4w9WgXcQ");

        let again = library
            .submit("Other title", "https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .unwrap();
        assert_eq!(again, AddOutcome::Duplicate(8));
        assert_eq!(library.playlist().len(), 9);
    }

    #[test]
    fn submit_rejects_bad_input() {
        let mut library = MusicLibrary::open(MemoryStore::new());
        assert_eq!(
            library.submit(" ", "https://youtu.be/dQw4w9WgXcQ"),
            Err(ValidationError::TitleRequired)
        );
        assert_eq!(
            library.submit("Song", "garbage"),
            Err(ValidationError::InvalidUrl)
        );
        assert_eq!(library.playlist().len(), 8);
    }

    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::DataDir(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn submit_keeps_track_when_persisting_fails() {
        let mut library = MusicLibrary::open(ReadOnly);
        let outcome = library.submit("Song", "youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(outcome, AddOutcome::Added(8));
        assert_eq!(library.playlist().len(), 9);
    }
}
