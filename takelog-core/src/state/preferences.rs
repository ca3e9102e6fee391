//! Per-install UI preferences remembered across sessions.

use serde::{Deserialize, Serialize};

use super::persistence::{load_json, save_json, KvStore, PREFERENCES_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Which side the primary controls sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub handedness: Handedness,
}

impl Preferences {
    pub fn load(store: &dyn KvStore) -> Self {
        load_json(store, PREFERENCES_KEY).unwrap_or_default()
    }

    pub fn save(&self, store: &mut dyn KvStore) {
        save_json(store, PREFERENCES_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::persistence::MemoryStore;

    #[test]
    fn defaults_when_missing() {
        let store = MemoryStore::new();
        assert_eq!(Preferences::load(&store), Preferences::default());
    }

    #[test]
    fn save_and_reload() {
        let mut store = MemoryStore::new();
        let prefs = Preferences { theme: Theme::Dark, handedness: Handedness::Left };
        prefs.save(&mut store);
        assert_eq!(Preferences::load(&store), prefs);
        assert_eq!(
            store.get(PREFERENCES_KEY).as_deref(),
            Some(r#"{"theme":"dark","handedness":"left"}"#)
        );
    }
}
