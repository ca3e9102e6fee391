//! Key-value persistence.
//!
//! The engine only needs `get`/`set` on string keys. Writes are best-effort:
//! a store that fails logs the error and carries on, and callers proceed as
//! if the write succeeded.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// All projects, as a JSON array.
pub const PROJECTS_KEY: &str = "takelog.projects";
/// Id of the project that was current when the app last ran.
pub const CURRENT_PROJECT_KEY: &str = "takelog.currentProjectId";
/// Theme / handedness preferences, as JSON.
pub const PREFERENCES_KEY: &str = "takelog.preferences";

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Read and decode a JSON value. Missing keys and undecodable values both
/// yield `None`; the latter is logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!(target: "persistence", "discarding unreadable value for {}: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(store: &mut dyn KvStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(e) => log::warn!(target: "persistence", "could not encode {}: {}", key, e),
    }
}
