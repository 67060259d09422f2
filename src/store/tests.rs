use super::*;
use std::fs;

#[test]
fn open_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = KvStore::open(dir.path().join("storage.json")).unwrap();
    assert_eq!(store.get(keys::EMAIL), None);
    assert!(!store.flag(keys::LOGGED_IN));
}

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    {
        let mut store = KvStore::open(&path).unwrap();
        store.set(keys::EMAIL, "a@b.com").unwrap();
        store.set_flag(keys::LOGGED_IN, true).unwrap();
        store.set_json(keys::RECENT_TRACKS, &vec![1u64, 2, 3]).unwrap();
    }

    let store = KvStore::open(&path).unwrap();
    assert_eq!(store.get(keys::EMAIL), Some("a@b.com"));
    assert_eq!(store.get(keys::LOGGED_IN), Some("true"));
    assert!(store.flag(keys::LOGGED_IN));
    let recents: Vec<u64> = store.get_json(keys::RECENT_TRACKS).unwrap().unwrap();
    assert_eq!(recents, vec![1, 2, 3]);
}

#[test]
fn remove_drops_the_entry_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut store = KvStore::open(&path).unwrap();
    store.set(keys::AVATAR, "/tmp/me.png").unwrap();
    store.remove(keys::AVATAR).unwrap();
    // removing a missing key is fine
    store.remove(keys::AVATAR).unwrap();

    let store = KvStore::open(&path).unwrap();
    assert!(!store.contains(keys::AVATAR));
}

#[test]
fn malformed_entry_falls_back_to_default() {
    let mut store = KvStore::in_memory();
    store.set(keys::FAVORITE_TRACKS, "{not json").unwrap();

    assert!(matches!(
        store.get_json::<Vec<u64>>(keys::FAVORITE_TRACKS),
        Err(StoreError::Malformed { .. })
    ));
    let favorites: Vec<u64> = store.load_or_default(keys::FAVORITE_TRACKS);
    assert!(favorites.is_empty());
}

#[test]
fn flag_is_strict_about_true() {
    let mut store = KvStore::in_memory();
    store.set(keys::LOGGED_IN, "false").unwrap();
    assert!(!store.flag(keys::LOGGED_IN));
    store.set(keys::LOGGED_IN, "TRUE").unwrap();
    assert!(!store.flag(keys::LOGGED_IN));
    store.set(keys::LOGGED_IN, "true").unwrap();
    assert!(store.flag(keys::LOGGED_IN));
}

#[test]
fn corrupt_file_is_an_error_and_open_or_reset_moves_it_aside() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    assert!(matches!(
        KvStore::open(&path),
        Err(StoreError::Corrupt { .. })
    ));

    let mut store = KvStore::open_or_reset(&path).unwrap();
    assert!(dir.path().join("storage.json.bak").exists());
    store.set(keys::EMAIL, "x@y.z").unwrap();

    let store = KvStore::open(&path).unwrap();
    assert_eq!(store.get(keys::EMAIL), Some("x@y.z"));
}

#[test]
fn in_memory_store_never_writes() {
    let mut store = KvStore::in_memory();
    store.set(keys::EMAIL, "a@b.com").unwrap();
    assert!(store.path().is_none());
    assert_eq!(store.get(keys::EMAIL), Some("a@b.com"));
}

#[test]
fn set_many_is_all_or_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let mut store = KvStore::open(&path).unwrap();
    store
        .set_many([(keys::EMAIL, "old@b.com"), (keys::PASSWORD, "old")])
        .unwrap();

    // A directory where the temp file goes makes the next flush fail.
    fs::create_dir(path.with_extension("json.tmp")).unwrap();
    assert!(
        store
            .set_many([(keys::EMAIL, "new@b.com"), (keys::PASSWORD, "new")])
            .is_err()
    );
    assert_eq!(store.get(keys::EMAIL), Some("old@b.com"));
    assert_eq!(store.get(keys::PASSWORD), Some("old"));

    let reopened = KvStore::open(&path).unwrap();
    assert_eq!(reopened.get(keys::EMAIL), Some("old@b.com"));
    assert_eq!(reopened.get(keys::PASSWORD), Some("old"));
}
