//! Integration tests for link resolution and the persisted playlist.

use focusdeck_core::music::{
    create_remote_track, extract_video_id, AddOutcome, MusicLibrary, STORAGE_KEY,
};
use focusdeck_core::{KeyValueStore, SqliteStore, ValidationError};
use proptest::prelude::*;

#[test]
fn test_known_link_shapes() {
    let cases = [
        "https://youtu.be/dQw4w9WgXcQ",
        "https://youtube.com/watch?v=dQw4w9WgXcQ&t=5",
        "https://www.youtube.com/watch?app=desktop&v=dQw4w9WgXcQ",
        "https://music.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        "youtu.be/dQw4w9WgXcQ",
        "  www.youtube.com/v/dQw4w9WgXcQ  ",
    ];
    for case in cases {
        let id = extract_video_id(case);
        assert_eq!(
            id.as_ref().map(|v| v.as_str()),
            Some("dQw4w9WgXcQ"),
            "failed for {case}"
        );
    }
}

#[test]
fn test_error_codes() {
    let err = create_remote_track("", "https://youtu.be/dQw4w9WgXcQ").unwrap_err();
    assert_eq!(err.code(), "TITLE_REQUIRED");
    let err = create_remote_track("Song", "garbage").unwrap_err();
    assert_eq!(err.code(), "INVALID_URL");
}

#[test]
fn test_library_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusdeck.db");

    {
        let backend = SqliteStore::open_at(&path).unwrap();
        let mut library = MusicLibrary::open(backend);
        let outcome = library
            .submit("Never Gonna", "https://youtu.be/dQw4w9WgXcQ")
            .unwrap();
        assert_eq!(outcome, AddOutcome::Added(8));
        assert_eq!(
            library.submit("", "https://youtu.be/dQw4w9WgXcQ"),
            Err(ValidationError::TitleRequired)
        );
    }

    let backend = SqliteStore::open_at(&path).unwrap();
    let raw = backend.get(STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("\"videoId\":\"dQw4w9WgXcQ\""));

    let library = MusicLibrary::open(backend);
    let playlist = library.playlist();
    assert_eq!(playlist.len(), 9);
    let remote: Vec<_> = playlist.remote_tracks().collect();
    assert_eq!(remote.len(), 1);
    assert_eq!(remote[0].title, "Never Gonna");
}

#[test]
fn test_corrupt_storage_starts_clean() {
    let mut backend = SqliteStore::open_memory().unwrap();
    backend.set(STORAGE_KEY, "definitely not json").unwrap();
    let library = MusicLibrary::open(backend);
    assert_eq!(library.playlist().len(), 8);
}

proptest! {
    #[test]
    fn extracted_ids_are_always_valid(input in ".{0,80}") {
        if let Some(id) = extract_video_id(&input) {
            prop_assert_eq!(id.as_str().len(), 11);
            prop_assert!(id
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
        }
    }

    #[test]
    fn watch_links_resolve_any_valid_id(id in "[A-Za-z0-9_-]{11}") {
        let url = format!("https://www.youtube.com/watch?v={id}");
        let resolved = extract_video_id(&url);
        prop_assert_eq!(resolved.as_ref().map(|v| v.as_str()), Some(id.as_str()));
        let short = format!("https://youtu.be/{id}");
        let resolved = extract_video_id(&short);
        prop_assert_eq!(resolved.as_ref().map(|v| v.as_str()), Some(id.as_str()));
    }
}
