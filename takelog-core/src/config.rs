use std::path::PathBuf;

use serde::Deserialize;

use crate::state::draft::DraftDefaults;
use takelog_types::{mics_from, TakeStatus, MIC_CHANNELS};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

const DEFAULT_HISTORY_DEPTH: usize = 500;

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    history: HistoryConfig,
    #[serde(default)]
    storage: StorageConfig,
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    status: Option<String>,
    mic_labels: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
struct HistoryConfig {
    max_depth: Option<usize>,
}

#[derive(Deserialize, Default)]
struct StorageConfig {
    path: Option<PathBuf>,
}

pub struct Config {
    defaults: DefaultsConfig,
    history: HistoryConfig,
    storage: StorageConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        let mut base = embedded();

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge(&mut base, user),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            defaults: base.defaults,
            history: base.history,
            storage: base.storage,
        }
    }

    /// Embedded defaults with `overrides` (TOML text) merged on top.
    /// Malformed overrides are ignored.
    pub fn from_overrides(overrides: &str) -> Self {
        let mut base = embedded();
        match toml::from_str::<ConfigFile>(overrides) {
            Ok(user) => merge(&mut base, user),
            Err(e) => log::warn!(target: "config", "ignoring malformed config overrides: {}", e),
        }
        Config {
            defaults: base.defaults,
            history: base.history,
            storage: base.storage,
        }
    }

    pub fn draft_defaults(&self) -> DraftDefaults {
        let status = self
            .defaults
            .status
            .as_deref()
            .and_then(TakeStatus::parse)
            .unwrap_or(TakeStatus::Ok);
        let labels = self.defaults.mic_labels.clone().unwrap_or_default();
        if labels.len() > MIC_CHANNELS {
            log::warn!(target: "config", "{} mic labels configured, keeping the first {}", labels.len(), MIC_CHANNELS);
        }
        DraftDefaults {
            status,
            mics: mics_from(labels),
        }
    }

    /// Undo depth per project (clamped to 1..=10000).
    pub fn history_depth(&self) -> usize {
        self.history
            .max_depth
            .unwrap_or(DEFAULT_HISTORY_DEPTH)
            .clamp(1, 10_000)
    }

    /// SQLite file backing the key-value store.
    pub fn storage_path(&self) -> PathBuf {
        self.storage.path.clone().unwrap_or_else(default_storage_path)
    }
}

fn embedded() -> ConfigFile {
    toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::error!(target: "config", "embedded config.toml is invalid: {}", e);
        ConfigFile::default()
    })
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("takelog").join("config.toml"))
}

fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("takelog")
        .join("takelog.sqlite")
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    if user.defaults.status.is_some() {
        base.defaults.status = user.defaults.status;
    }
    if user.defaults.mic_labels.is_some() {
        base.defaults.mic_labels = user.defaults.mic_labels;
    }
    if user.history.max_depth.is_some() {
        base.history.max_depth = user.history.max_depth;
    }
    if user.storage.path.is_some() {
        base.storage.path = user.storage.path;
    }
}
