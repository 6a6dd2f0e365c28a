//! Load-once, write-through JSON state store.
//!
//! The file is read a single time at construction. Every [`StateStore::set`]
//! serializes the full map (pretty-printed) into a temporary file next to the
//! target and atomically renames it into place. Writers are serialized by a
//! dedicated lock, so two interleaved `set` calls can never leave a torn file.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use tutorbot_types::{UserId, UserState};

use crate::error::StoreError;

/// Mapping from user ID to state, mirrored to a single JSON file.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    data: RwLock<BTreeMap<UserId, UserState>>,
    /// Held for the whole snapshot-write-commit sequence of `set`.
    write_lock: Mutex<()>,
}

impl StateStore {
    /// Open the store backed by `path`.
    ///
    /// A missing file, an unreadable file, or content that is not a JSON
    /// object all start an empty store. First runs need no bootstrap step.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = load_file(&path);
        info!(
            path = %path.display(),
            users = data.len(),
            "state store loaded"
        );
        Self {
            path,
            data: RwLock::new(data),
            write_lock: Mutex::new(()),
        }
    }

    /// Return the stored state for `user_id`, or an empty object if the user
    /// has never been seen.
    pub fn get(&self, user_id: &UserId) -> UserState {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        data.get(user_id).cloned().unwrap_or_default()
    }

    /// Overwrite the state for `user_id` and persist the whole store.
    ///
    /// The in-memory map only changes once the file has been replaced, so a
    /// failed write leaves memory and disk in agreement on the old contents.
    pub fn set(&self, user_id: &UserId, state: UserState) -> Result<(), StoreError> {
        let _writer = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut snapshot = self
            .data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        snapshot.insert(user_id.clone(), state);

        self.write_file(&snapshot)?;

        *self.data.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
        debug!(user_id = %user_id, path = %self.path.display(), "state persisted");
        Ok(())
    }

    /// Number of users with stored state.
    pub fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no user has stored state yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize `snapshot` and atomically replace the state file with it.
    fn write_file(&self, snapshot: &BTreeMap<UserId, UserState>) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(snapshot)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(body.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

/// Read the state file, falling back to an empty map on any failure.
fn load_file(path: &Path) -> BTreeMap<UserId, UserState> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "state file unreadable, starting empty");
            }
            return BTreeMap::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "state file malformed, starting empty");
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn scratch() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        (dir, path)
    }

    #[test]
    fn unknown_user_gets_empty_object() {
        let (_dir, path) = scratch();
        let store = StateStore::open(&path);
        let state = store.get(&UserId::from("nobody"));
        assert!(state.is_empty_object());
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let (_dir, path) = scratch();
        std::fs::write(&path, "{ not json").unwrap();
        let store = StateStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn non_object_file_starts_empty() {
        let (_dir, path) = scratch();
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let store = StateStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn set_writes_pretty_json_immediately() {
        let (_dir, path) = scratch();
        let store = StateStore::open(&path);
        let result = store.set(&UserId::from("42"), UserState::from(json!({"messages": ["hi"]})));
        assert!(result.is_ok());

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("\n  \"42\": {"));
        let parsed: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
        assert_eq!(parsed, json!({"42": {"messages": ["hi"]}}));
    }

    #[test]
    fn set_overwrites_previous_state() {
        let (_dir, path) = scratch();
        let store = StateStore::open(&path);
        let user = UserId::from("7");
        assert!(store.set(&user, UserState::from(json!({"n": 1}))).is_ok());
        assert!(store.set(&user, UserState::from(json!({"n": 2}))).is_ok());
        assert_eq!(store.get(&user), UserState::from(json!({"n": 2})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let (dir, _path) = scratch();
        // A directory cannot be replaced by a file rename.
        let blocked = dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "x").unwrap();

        let store = StateStore::open(&blocked);
        let user = UserId::from("1");
        let result = store.set(&user, UserState::from(json!({"a": 1})));
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(store.get(&user).is_empty_object());
    }
}
