use super::*;
use crate::store::{KvStore, keys};
use std::fs;
use std::path::{Path, PathBuf};

fn t(id: u64, title: &str) -> Track {
    Track {
        id,
        title: title.into(),
        artist: "Artist".into(),
        cover: String::new(),
        description: String::new(),
        audio: format!("/audio/{id}.mp3"),
        kind: TrackKind::Music,
    }
}

fn podcast(id: u64, title: &str) -> Track {
    Track {
        kind: TrackKind::Podcast,
        ..t(id, title)
    }
}

fn titles(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.title.as_str()).collect()
}

fn library() -> LibraryState {
    LibraryState::new(
        vec![t(1, "Song A"), t(2, "Song B"), t(3, "Test")],
        DEFAULT_RECENTS_LIMIT,
    )
}

#[test]
fn search_is_case_insensitive_title_substring() {
    let mut store = KvStore::in_memory();
    let mut lib = library();

    lib.search("te", &mut store).unwrap();
    assert_eq!(titles(lib.filtered()), vec!["Test"]);

    lib.search("SONG", &mut store).unwrap();
    assert_eq!(titles(lib.filtered()), vec!["Song A", "Song B"]);

    lib.search("", &mut store).unwrap();
    assert_eq!(lib.filtered().len(), 3);
}

#[test]
fn search_ignores_artist() {
    let tracks = vec![t(1, "Alpha")];
    assert!(search_tracks(&tracks, "artist").is_empty());
}

#[test]
fn typing_a_query_forces_the_all_tab() {
    let mut store = KvStore::in_memory();
    let mut lib = library();
    lib.select_tab(Tab::Favorites, &mut store).unwrap();
    assert!(lib.filtered().is_empty());

    lib.search("song", &mut store).unwrap();
    assert_eq!(lib.tab(), Tab::All);
    assert_eq!(lib.filtered().len(), 2);
}

#[test]
fn toggling_favorite_twice_restores_membership() {
    let mut store = KvStore::in_memory();
    let mut lib = library();
    let track = t(2, "Song B");

    assert!(lib.toggle_favorite(&track, &mut store).unwrap());
    assert!(lib.is_favorite(2));
    let saved: Vec<Track> = store.get_json(keys::FAVORITE_TRACKS).unwrap().unwrap();
    assert_eq!(saved.len(), 1);

    assert!(!lib.toggle_favorite(&track, &mut store).unwrap());
    assert!(!lib.is_favorite(2));
    assert!(lib.favorites().is_empty());
    let saved: Vec<Track> = store.get_json(keys::FAVORITE_TRACKS).unwrap().unwrap();
    assert!(saved.is_empty());
}

#[test]
fn favorites_tab_follows_toggles() {
    let mut store = KvStore::in_memory();
    let mut lib = library();
    lib.select_tab(Tab::Favorites, &mut store).unwrap();

    lib.toggle_favorite(&t(1, "Song A"), &mut store).unwrap();
    assert_eq!(titles(lib.filtered()), vec!["Song A"]);

    lib.toggle_favorite(&t(1, "Song A"), &mut store).unwrap();
    assert!(lib.filtered().is_empty());
}

#[test]
fn recents_are_capped_and_deduplicated() {
    let mut store = KvStore::in_memory();
    let mut lib = LibraryState::new(Vec::new(), DEFAULT_RECENTS_LIMIT);

    for id in 1..=7 {
        lib.add_recently_played(&t(id, &format!("T{id}")), &mut store)
            .unwrap();
    }
    assert_eq!(lib.recents().len(), 5);
    let ids: Vec<u64> = lib.recents().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![7, 6, 5, 4, 3]);

    lib.add_recently_played(&t(5, "T5"), &mut store).unwrap();
    let ids: Vec<u64> = lib.recents().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![5, 7, 6, 4, 3]);

    let saved: Vec<Track> = store.get_json(keys::RECENT_TRACKS).unwrap().unwrap();
    assert_eq!(saved, lib.recents());
}

#[test]
fn restore_reads_saved_collections_and_trims_recents() {
    let mut store = KvStore::in_memory();
    let many: Vec<Track> = (1..=8).map(|i| t(i, "x")).collect();
    store.set_json(keys::RECENT_TRACKS, &many).unwrap();
    store.set_json(keys::FAVORITE_TRACKS, &vec![t(2, "Song B")]).unwrap();
    store
        .set_json(
            keys::PLAYLISTS,
            &vec![Playlist {
                id: 10,
                name: "Mix".into(),
                tracks: vec![t(3, "Test")],
            }],
        )
        .unwrap();

    let lib = LibraryState::restore(&store, Ok(vec![t(1, "Song A")]), 5);
    assert_eq!(lib.recents().len(), 5);
    assert!(lib.is_favorite(2));
    assert_eq!(lib.playlists().len(), 1);
    assert_eq!(lib.load_error(), None);
}

#[test]
fn restore_drops_repeated_ids_before_trimming() {
    let mut store = KvStore::in_memory();
    let saved = vec![
        t(1, "one"),
        t(2, "two"),
        t(1, "one again"),
        t(3, "three"),
        t(2, "two again"),
        t(4, "four"),
        t(5, "five"),
        t(6, "six"),
    ];
    store.set_json(keys::RECENT_TRACKS, &saved).unwrap();
    store
        .set_json(keys::FAVORITE_TRACKS, &vec![t(7, "fav"), t(7, "fav")])
        .unwrap();

    let lib = LibraryState::restore(&store, Ok(Vec::new()), 5);
    let ids: Vec<u64> = lib.recents().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(titles(lib.recents())[0], "one");
    assert_eq!(lib.favorites().len(), 1);
}

#[test]
fn restore_does_not_let_the_saved_snapshot_shadow_the_catalog() {
    let mut store = KvStore::in_memory();
    store.set_json(keys::TRACKS, &vec![t(99, "Stale")]).unwrap();

    let lib = LibraryState::restore(&store, Ok(vec![t(1, "Fresh")]), 5);
    assert_eq!(titles(lib.filtered()), vec!["Fresh"]);
}

#[test]
fn restore_with_malformed_entries_uses_defaults() {
    let mut store = KvStore::in_memory();
    store.set(keys::FAVORITE_TRACKS, "oops").unwrap();
    store.set(keys::PLAYLISTS, "{\"id\": 1}").unwrap();

    let lib = LibraryState::restore(&store, Ok(vec![t(1, "A")]), 5);
    assert!(lib.favorites().is_empty());
    assert!(lib.playlists().is_empty());
}

#[test]
fn restore_after_load_failure_reports_message_and_shows_nothing() {
    let store = KvStore::in_memory();
    let err = load_catalog(&CatalogSource::File(PathBuf::from(
        "/definitely/not/here/tracks.json",
    )))
    .unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));

    let lib = LibraryState::restore(&store, Err(err), 5);
    assert_eq!(lib.load_error(), Some(LOAD_FAILED_MESSAGE));
    assert!(lib.catalog().is_empty());
    assert!(lib.filtered().is_empty());
}

#[test]
fn selecting_a_playlist_moves_the_tab_machine() {
    let mut store = KvStore::in_memory();
    store
        .set_json(
            keys::PLAYLISTS,
            &vec![Playlist {
                id: 42,
                name: "Road".into(),
                tracks: vec![t(2, "Song B"), t(3, "Test")],
            }],
        )
        .unwrap();
    let mut lib = LibraryState::restore(&store, Ok(library().catalog().to_vec()), 5);

    assert!(!lib.select_playlist(7, &mut store).unwrap());
    assert_eq!(lib.tab(), Tab::All);

    assert!(lib.select_playlist(42, &mut store).unwrap());
    assert_eq!(lib.tab(), Tab::Playlist(42));
    assert!(Tab::Playlists.highlights(lib.tab()));
    assert_eq!(titles(lib.filtered()), vec!["Song B", "Test"]);
}

#[test]
fn playlists_tab_is_empty_and_kind_tabs_filter() {
    let mut store = KvStore::in_memory();
    let mut lib = LibraryState::new(
        vec![t(1, "Tune"), podcast(2, "Talk"), t(3, "Jam")],
        5,
    );

    lib.select_tab(Tab::Playlists, &mut store).unwrap();
    assert!(lib.filtered().is_empty());

    lib.select_tab(Tab::Music, &mut store).unwrap();
    assert_eq!(titles(lib.filtered()), vec!["Tune", "Jam"]);

    lib.select_tab(Tab::Podcasts, &mut store).unwrap();
    assert_eq!(titles(lib.filtered()), vec!["Talk"]);
}

#[test]
fn view_changes_write_the_snapshot() {
    let mut store = KvStore::in_memory();
    let mut lib = library();
    lib.search("test", &mut store).unwrap();
    let snapshot: Vec<Track> = store.get_json(keys::TRACKS).unwrap().unwrap();
    assert_eq!(titles(&snapshot), vec!["Test"]);
}

#[test]
fn user_track_is_appended_to_view_only() {
    let mut store = KvStore::in_memory();
    let mut lib = library();

    let added = lib
        .add_user_track(
            NewTrack {
                title: " Demo ".into(),
                artist: "Me".into(),
                cover: None,
                audio: Some(PathBuf::from("/tmp/demo.mp3")),
            },
            &mut store,
        )
        .unwrap();

    assert_eq!(added.title, "Demo");
    assert_eq!(added.description, "User uploaded");
    assert_eq!(added.audio, "/tmp/demo.mp3");
    assert_eq!(added.cover, "");
    assert!(added.id > 1_000_000_000_000);
    assert_eq!(lib.filtered().last().map(|t| t.id), Some(added.id));
    assert_eq!(lib.catalog().len(), 3);

    // a later view change re-derives from the catalog
    lib.select_tab(Tab::All, &mut store).unwrap();
    assert!(lib.filtered().iter().all(|t| t.id != added.id));
}

#[test]
fn user_tracks_added_back_to_back_get_distinct_ids() {
    let mut store = KvStore::in_memory();
    let mut lib = library();
    let upload = NewTrack {
        title: "One".into(),
        artist: "Me".into(),
        ..NewTrack::default()
    };
    let a = lib.add_user_track(upload.clone(), &mut store).unwrap();
    let b = lib.add_user_track(upload, &mut store).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn user_track_requires_title_and_artist() {
    let mut store = KvStore::in_memory();
    let mut lib = library();
    let err = lib
        .add_user_track(
            NewTrack {
                title: "   ".into(),
                artist: "Me".into(),
                ..NewTrack::default()
            },
            &mut store,
        )
        .unwrap_err();
    assert!(matches!(err, LibraryError::MissingField("title")));
    assert_eq!(lib.filtered().len(), 3);
}

#[test]
fn catalog_file_parses_with_optional_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.json");
    fs::write(
        &path,
        r#"[
            {"id": 1, "title": "One", "artist": "A", "cover": "/img/1.png",
             "description": "first", "audio": "/audio/1.mp3"},
            {"id": 2, "title": "Two", "artist": "B", "kind": "podcast"}
        ]"#,
    )
    .unwrap();

    let source = CatalogSource::File(path.clone());
    let tracks = load_catalog(&source).unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].kind, TrackKind::Music);
    assert_eq!(tracks[1].kind, TrackKind::Podcast);
    assert_eq!(tracks[1].description, "");
    assert_eq!(source.base_dir(), Some(dir.path()));
}

#[test]
fn catalog_that_is_not_a_list_fails_to_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.json");
    fs::write(&path, r#"{"tracks": []}"#).unwrap();
    assert!(matches!(
        load_catalog(&CatalogSource::File(path)),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn catalog_source_parse_distinguishes_urls() {
    assert_eq!(
        CatalogSource::parse("https://example.com/data/tracks.json"),
        CatalogSource::Url("https://example.com/data/tracks.json".into())
    );
    assert_eq!(
        CatalogSource::parse(" data/tracks.json "),
        CatalogSource::File(PathBuf::from("data/tracks.json"))
    );
}

#[test]
fn resolve_media_maps_site_rooted_paths_under_media_root() {
    let root = Path::new("/srv/public");
    assert_eq!(
        resolve_media("/audio/does-not-exist-xyz.mp3", Some(root)),
        PathBuf::from("/srv/public/audio/does-not-exist-xyz.mp3")
    );
    assert_eq!(
        resolve_media("audio/a.mp3", Some(root)),
        PathBuf::from("/srv/public/audio/a.mp3")
    );
    assert_eq!(
        resolve_media("file:///tmp/a.mp3", None),
        PathBuf::from("/tmp/a.mp3")
    );
}

#[test]
fn resolve_media_keeps_existing_absolute_paths() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("song.mp3");
    fs::write(&file, b"x").unwrap();
    let reference = file.display().to_string();
    assert_eq!(
        resolve_media(&reference, Some(Path::new("/elsewhere"))),
        file
    );
}

#[test]
fn track_display_joins_artist_and_title() {
    let mut track = t(1, "Song");
    assert_eq!(track.display(), "Artist - Song");
    track.artist = "  ".into();
    assert_eq!(track.display(), "Song");
}
