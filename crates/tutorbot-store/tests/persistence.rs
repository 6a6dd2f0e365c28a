//! Integration tests for state persistence across store instances.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use serde_json::json;
use tutorbot_store::StateStore;
use tutorbot_types::{UserId, UserState};

#[test]
fn reopened_store_returns_what_was_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let states = [
        ("100", json!({"messages": ["a", "b"]})),
        ("200", json!({})),
        ("300", json!({"level": 3, "nested": {"ok": true}})),
    ];

    {
        let store = StateStore::open(&path);
        for (user, state) in &states {
            store
                .set(&UserId::from(*user), UserState::from(state.clone()))
                .unwrap();
        }
    }

    let reopened = StateStore::open(&path);
    assert_eq!(reopened.len(), states.len());
    for (user, state) in states {
        assert_eq!(reopened.get(&UserId::from(user)).into_value(), state);
    }
}

#[test]
fn missing_parent_directory_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist").join("state.json");

    let store = StateStore::open(&path);
    let result = store.set(&UserId::from("1"), UserState::default());
    assert!(result.is_err());
}

#[test]
fn concurrent_writers_never_corrupt_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let store = Arc::new(StateStore::open(&path));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for j in 0..10 {
                    let user = UserId::from(format!("user-{i}"));
                    store
                        .set(&user, UserState::from(json!({ "count": j })))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let object = on_disk.as_object().unwrap();
    assert_eq!(object.len(), 8);
    for value in object.values() {
        assert_eq!(value, &json!({ "count": 9 }));
    }
}
