use assert_matches::assert_matches;

use super::*;

fn exercise(store: &dyn Store) {
    assert!(store.register("alice").unwrap());
    assert!(!store.register("alice").unwrap());
    assert!(store.register("bob").unwrap());
    assert!(store.register("Alice").unwrap());

    assert_eq!(store.record_score("alice", 50).unwrap(), Some(50));
    assert_eq!(store.record_score("alice", 30).unwrap(), Some(50));
    assert_eq!(store.record_score("bob", 70).unwrap(), Some(70));
    assert_eq!(store.record_score("carol", 10).unwrap(), None);
    assert_eq!(store.score("alice").unwrap(), Some(50));
    assert_eq!(store.score("Alice").unwrap(), Some(0));
    assert_eq!(store.score("carol").unwrap(), None);

    assert_eq!(
        store.leaderboard().unwrap(),
        vec![
            Player::new("bob", 70),
            Player::new("alice", 50),
            Player::new("Alice", 0),
        ]
    );

    assert!(store.delete("Alice").unwrap());
    assert!(!store.delete("Alice").unwrap());

    let session = RawSession {
        used_nations: vec!["Spain".into(), "Nepal".into()],
        last_letter: Some('l'),
    };
    assert_eq!(store.load_session().unwrap(), RawSession::default());
    store.save_session(&session).unwrap();
    assert_eq!(store.load_session().unwrap(), session);
}

#[test]
fn test_memory() {
    let store = MemoryStore::default();
    exercise(&store);
    store.reset(&RawSession::default(), Scores::All).unwrap();
    assert_eq!(store.load_session().unwrap(), RawSession::default());
    assert_eq!(
        store.leaderboard().unwrap(),
        vec![Player::new("alice", 0), Player::new("bob", 0)]
    );
}

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    {
        let store = JsonStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert!(!path.exists());
        exercise(&store);
    }

    // Reopening sees every acknowledged change.
    let store = JsonStore::open(&path).unwrap();
    assert_eq!(store.score("alice").unwrap(), Some(50));
    assert_eq!(store.score("bob").unwrap(), Some(70));
    assert_eq!(store.score("Alice").unwrap(), None);
    assert_eq!(store.load_session().unwrap().last_letter, Some('l'));

    store.reset(&RawSession::default(), Scores::All).unwrap();
    let store = JsonStore::open(&path).unwrap();
    assert_eq!(store.score("bob").unwrap(), Some(0));
    assert_eq!(store.load_session().unwrap(), RawSession::default());
    assert_eq!(store.leaderboard().unwrap().len(), 2);
}

#[test]
fn test_json_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"{
            "users": [{"username": "alice", "score": 12}],
            "usedNations": ["Spain"],
            "lastLetter": "S"
        }"#,
    )
    .unwrap();
    let store = JsonStore::open(&path).unwrap();
    assert_eq!(store.score("alice").unwrap(), Some(12));
    assert_eq!(store.load_session().unwrap().used_nations, vec!["Spain"]);

    store.register("bob").unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "users": [
                {"username": "alice", "score": 12},
                {"username": "bob", "score": 0},
            ],
            "usedNations": ["Spain"],
            "lastLetter": "S",
        })
    );
}

#[test]
fn test_json_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_matches!(JsonStore::open(&path), Err(StoreError::Malformed(_)));
}

#[test]
fn test_json_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("data.json");
    let store = JsonStore::open(&path).unwrap();
    assert_matches!(store.register("alice"), Err(StoreError::Io { .. }));
    // The failed change was not committed.
    assert_eq!(store.score("alice").unwrap(), None);
    assert!(store.leaderboard().unwrap().is_empty());
}

#[test]
fn test_unchanged_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let store = JsonStore::open(&path).unwrap();
    assert_eq!(store.record_score("nobody", 5).unwrap(), None);
    assert!(!store.delete("nobody").unwrap());
    assert!(!path.exists());
}

#[test]
fn test_reset() {
    let store = MemoryStore::default();
    store.register("alice").unwrap();
    store.register("bob").unwrap();
    store.record_score("alice", 5).unwrap();
    store.record_score("bob", 8).unwrap();
    let played = RawSession {
        used_nations: vec!["Spain".into(), "Nepal".into()],
        last_letter: Some('l'),
    };
    store.save_session(&played).unwrap();

    store.reset(&RawSession::default(), Scores::Kept).unwrap();
    assert_eq!(store.load_session().unwrap(), RawSession::default());
    assert_eq!(store.score("alice").unwrap(), Some(5));

    store.save_session(&played).unwrap();
    store.reset(&RawSession::default(), Scores::Player("alice")).unwrap();
    assert_eq!(store.load_session().unwrap(), RawSession::default());
    assert_eq!(store.score("alice").unwrap(), Some(0));
    assert_eq!(store.score("bob").unwrap(), Some(8));

    store.reset(&RawSession::default(), Scores::Player("nobody")).unwrap();
    assert_eq!(store.leaderboard().unwrap().len(), 2);
}

#[test]
fn test_json_failed_reset() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir(&data).unwrap();
    let path = data.join("data.json");
    let store = JsonStore::open(&path).unwrap();
    store.register("alice").unwrap();
    store.record_score("alice", 9).unwrap();
    let played = RawSession {
        used_nations: vec!["Spain".into()],
        last_letter: Some('n'),
    };
    store.save_session(&played).unwrap();

    std::fs::remove_dir_all(&data).unwrap();
    assert_matches!(
        store.reset(&RawSession::default(), Scores::All),
        Err(StoreError::Io { .. })
    );
    // Neither half of the reset was committed.
    assert_eq!(store.load_session().unwrap(), played);
    assert_eq!(store.score("alice").unwrap(), Some(9));
}

#[test]
fn test_json_failed_rename_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let store = JsonStore::open(&path).unwrap();
    // A non-empty directory can't be replaced by a file.
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep"), "").unwrap();
    assert_matches!(store.register("alice"), Err(StoreError::Io { .. }));
    assert!(!dir.path().join("data.json.tmp").exists());
    assert_eq!(store.score("alice").unwrap(), None);
}
