//! A single logged take.

use serde::{Deserialize, Serialize};

use crate::draft::Draft;
use crate::status::TakeStatus;
use crate::{now_iso, TakeId};

/// Number of microphone channels tracked per take.
pub const MIC_CHANNELS: usize = 8;

/// Channel labels, one per mic slot, blank when unused.
pub type MicLabels = [String; MIC_CHANNELS];

pub fn blank_mics() -> MicLabels {
    Default::default()
}

/// Fill mic slots in order from `labels`; extra labels are dropped and
/// missing ones stay blank.
pub fn mics_from<I>(labels: I) -> MicLabels
where
    I: IntoIterator<Item = String>,
{
    let mut mics = blank_mics();
    for (slot, label) in mics.iter_mut().zip(labels) {
        *slot = label;
    }
    mics
}

/// One recorded take. Field names follow the camelCase interchange shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeRow {
    #[serde(default = "TakeId::generate")]
    pub id: TakeId,
    #[serde(default = "now_iso")]
    pub created_at: String,
    #[serde(default = "now_iso")]
    pub updated_at: String,
    #[serde(default)]
    pub file_no: String,
    #[serde(default)]
    pub scene_no: String,
    #[serde(default)]
    pub cut_no: String,
    #[serde(default)]
    pub take_no: String,
    #[serde(default)]
    pub status: TakeStatus,
    #[serde(default = "blank_mics", deserialize_with = "mic_serde::deserialize")]
    pub mics: MicLabels,
    #[serde(default)]
    pub note: String,
}

impl TakeRow {
    /// Build a fresh row from a committed draft, minting id and timestamps.
    pub fn from_draft(draft: &Draft) -> Self {
        let now = now_iso();
        Self {
            id: TakeId::generate(),
            created_at: now.clone(),
            updated_at: now,
            file_no: draft.file_no.trim().to_string(),
            scene_no: draft.scene_token(),
            cut_no: draft.cut_token(),
            take_no: draft.take_token(),
            status: draft.status,
            mics: draft.mics.clone(),
            note: draft.note.clone(),
        }
    }

    /// Every textual field a search query is matched against.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.file_no.as_str(),
            self.scene_no.as_str(),
            self.cut_no.as_str(),
            self.take_no.as_str(),
            self.status.as_str(),
        ]
        .into_iter()
        .chain(self.mics.iter().map(String::as_str))
        .chain(std::iter::once(self.note.as_str()))
    }

    /// Case-insensitive substring match on any field, AND an exact status match.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str, status: Option<TakeStatus>) -> bool {
        if status.is_some_and(|s| s != self.status) {
            return false;
        }
        needle.is_empty()
            || self
                .searchable_fields()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

mod mic_serde {
    use serde::{Deserialize, Deserializer};

    use super::{mics_from, MicLabels};

    /// Accept any-length arrays (nulls allowed) and blank-fill to eight slots.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<MicLabels, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Vec<Option<String>> = Vec::deserialize(deserializer)?;
        Ok(mics_from(raw.into_iter().map(Option::unwrap_or_default)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> TakeRow {
        TakeRow {
            id: TakeId::new("t1"),
            created_at: "2024-10-16T09:00:00.000Z".into(),
            updated_at: "2024-10-16T09:00:00.000Z".into(),
            file_no: "241016_001".into(),
            scene_no: "12a".into(),
            cut_no: "only".into(),
            take_no: "3".into(),
            status: TakeStatus::Ng,
            mics: mics_from(["Boom".to_string(), "Lav Alice".to_string()]),
            note: "plane overhead".into(),
        }
    }

    #[test]
    fn matches_any_field_case_insensitive() {
        let r = row();
        assert!(r.matches("lav", None));
        assert!(r.matches("plane", None));
        assert!(r.matches("only", None));
        assert!(r.matches("ng", None));
        assert!(r.matches("", None));
        assert!(!r.matches("drone", None));
    }

    #[test]
    fn status_filter_is_anded() {
        let r = row();
        assert!(r.matches("boom", Some(TakeStatus::Ng)));
        assert!(!r.matches("boom", Some(TakeStatus::Ok)));
        assert!(!r.matches("", Some(TakeStatus::Keep)));
    }

    #[test]
    fn camel_case_json_shape() {
        let json = serde_json::to_value(row()).unwrap();
        assert_eq!(json["fileNo"], "241016_001");
        assert_eq!(json["mics"].as_array().unwrap().len(), MIC_CHANNELS);
        assert_eq!(json["status"], "NG");
    }

    #[test]
    fn short_mic_arrays_are_blank_filled() {
        let r: TakeRow = serde_json::from_str(
            r#"{"id":"x","fileNo":"241016_001","mics":["A",null]}"#,
        )
        .unwrap();
        assert_eq!(r.mics[0], "A");
        assert_eq!(r.mics[1], "");
        assert_eq!(r.mics[7], "");
        assert_eq!(r.status, TakeStatus::Keep);
    }

    #[test]
    fn missing_id_is_minted() {
        let r: TakeRow = serde_json::from_str(r#"{"fileNo":"1"}"#).unwrap();
        assert!(!r.id.as_str().is_empty());
        assert_eq!(r.mics, blank_mics());
    }
}
