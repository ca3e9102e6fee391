//! The row under construction.

use serde::{Deserialize, Serialize};

use crate::ident::{CutNo, Numbered, TakeNo};
use crate::status::TakeStatus;
use crate::take::{blank_mics, MicLabels, TakeRow};

/// Same shape as a [`TakeRow`] minus id and timestamps, with scene and cut
/// kept split into number + suffix so each half can be edited on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Empty until the sequence generator fills it or the operator types one.
    pub file_no: String,
    pub scene: Numbered,
    pub cut: CutNo,
    pub take: TakeNo,
    pub status: TakeStatus,
    pub mics: MicLabels,
    pub note: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self::new(TakeStatus::Ok, blank_mics())
    }
}

impl Draft {
    /// Fresh draft at scene 1, cut 1, take 1.
    pub fn new(status: TakeStatus, mics: MicLabels) -> Self {
        Self {
            file_no: String::new(),
            scene: Numbered::default(),
            cut: CutNo::default(),
            take: TakeNo::default(),
            status,
            mics,
            note: String::new(),
        }
    }

    /// Reshape a committed row back into draft form.
    pub fn from_row(row: &TakeRow) -> Self {
        Self {
            file_no: row.file_no.clone(),
            scene: Numbered::parse(&row.scene_no),
            cut: CutNo::parse(&row.cut_no),
            take: TakeNo::parse(&row.take_no),
            status: row.status,
            mics: row.mics.clone(),
            note: row.note.clone(),
        }
    }

    pub fn scene_token(&self) -> String {
        self.scene.token()
    }

    pub fn cut_token(&self) -> String {
        self.cut.token()
    }

    pub fn take_token(&self) -> String {
        self.take.token()
    }

    /// The file number must be non-blank and scene, cut and take must be at
    /// least 1. Malformed tokens parse to 0, so a 0 here means the field was
    /// never given a usable value.
    pub fn validate(&self) -> Result<(), CommitError> {
        if self.file_no.trim().is_empty() {
            return Err(CommitError::MissingFileNo);
        }
        if self.scene.number == 0 {
            return Err(CommitError::MissingScene);
        }
        if matches!(self.cut, CutNo::Numbered(n) if n.number == 0) {
            return Err(CommitError::MissingCut);
        }
        if self.take.0 == 0 {
            return Err(CommitError::MissingTake);
        }
        Ok(())
    }
}

/// Why a commit was rejected. The repository is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitError {
    MissingFileNo,
    MissingScene,
    MissingCut,
    MissingTake,
}

impl std::fmt::Display for CommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = match self {
            Self::MissingFileNo => "file number",
            Self::MissingScene => "scene number",
            Self::MissingCut => "cut number",
            Self::MissingTake => "take number",
        };
        write!(f, "{} is required", field)
    }
}

impl std::error::Error for CommitError {}
