//! Action types for the dispatch system.
//!
//! Actions represent operator intents: edits to the draft, commits, and
//! history navigation. The UI layer builds them; takelog-core dispatches them.

use serde::{Deserialize, Serialize};

use crate::draft::CommitError;
use crate::ident::{CutNo, Suffix};
use crate::status::TakeStatus;
use crate::TakeId;

// ============================================================================
// Draft editing
// ============================================================================

/// Field edits on the in-progress draft. None of these touch the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DraftAction {
    SetFileNo(String),
    SetScene(u32),
    SetSceneSuffix(Suffix),
    /// ±1 for the arrow buttons, ±FAST_STEP for the jump buttons.
    StepScene(i32),
    SetCut(CutNo),
    /// Ignored while the cut is "only".
    SetCutSuffix(Suffix),
    StepCut(i32),
    SetTake(u32),
    StepTake(i32),
    SetStatus(TakeStatus),
    /// Mic slot index (0-based) and label. Out-of-range slots are ignored.
    SetMic(usize, String),
    SetNote(String),
}

// ============================================================================
// Top-level action
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Draft(DraftAction),
    /// Accept the draft into the take list and re-prime it for the next take.
    Commit,
    /// Delete a take. Confirmation is the caller's job.
    Remove(TakeId),
    /// Pull a take out of the list and load it into the draft for re-editing.
    Edit(TakeId),
    /// Scene, cut and take back to 1.
    ResetCounters,
    Undo,
    Redo,
}

// ============================================================================
// Dispatch result
// ============================================================================

/// What happened, for the UI layer to surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatusEvent {
    Committed { id: TakeId, file_no: String },
    Rejected(CommitError),
    Removed(TakeId),
    Editing(TakeId),
    NotFound(TakeId),
    CountersReset,
    Undone,
    Redone,
    NothingToUndo,
    NothingToRedo,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchResult {
    pub status: Vec<StatusEvent>,
    /// True when the take list changed and was written back to the store.
    pub rows_changed: bool,
}

impl DispatchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_status(event: StatusEvent) -> Self {
        Self { status: vec![event], ..Self::default() }
    }

    pub fn push_status(&mut self, event: StatusEvent) {
        self.status.push(event);
    }

    /// Whether the action was turned down (validation failure or unknown id).
    pub fn is_rejected(&self) -> bool {
        self.status
            .iter()
            .any(|e| matches!(e, StatusEvent::Rejected(_) | StatusEvent::NotFound(_)))
    }
}
