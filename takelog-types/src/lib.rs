//! # takelog-types
//!
//! Shared type definitions for the take log.
//! This crate contains the data structures used by takelog-core and the CLI:
//! take rows, projects, the in-progress draft, and the identifier codec for
//! scene/cut/take numbers. Nothing in here performs I/O.

pub mod action;
pub mod collate;
pub mod draft;
pub mod ident;
pub mod project;
pub mod status;
pub mod take;

pub use action::*;
pub use collate::locale_cmp;
pub use draft::{CommitError, Draft};
pub use ident::{combine, parse_token, CutNo, Numbered, Suffix, TakeNo, FAST_STEP, ONLY_TOKEN, SENTINEL};
pub use project::{Project, ProjectView};
pub use status::TakeStatus;
pub use take::{blank_mics, mics_from, MicLabels, TakeRow, MIC_CHANNELS};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a take row. Minted once, never reused.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TakeId(String);

impl TakeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TakeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current UTC time as an ISO-8601 string with millisecond precision,
/// e.g. `2024-10-16T09:30:00.000Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = TakeId::generate();
        let b = TakeId::generate();
        assert_ne!(a, b);
        assert_ne!(ProjectId::generate(), ProjectId::generate());
    }

    #[test]
    fn now_iso_is_utc_millis() {
        let ts = now_iso();
        assert!(ts.ends_with('Z'));
        // 2024-10-16T09:30:00.000Z
        assert_eq!(ts.len(), 24);
        assert_eq!(&ts[10..11], "T");
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = TakeId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
