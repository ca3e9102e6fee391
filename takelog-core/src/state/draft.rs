//! Draft controller: owns the next row to commit and re-primes it after
//! each commit.

use chrono::NaiveDate;

use takelog_types::{
    CommitError, CutNo, Draft, DraftAction, MicLabels, Numbered, Suffix, TakeId, TakeNo, TakeRow,
    TakeStatus, MIC_CHANNELS,
};

use super::repository::TakeRepository;
use super::sequence::next_file_no_on;

/// Values a fresh draft starts from (from config).
#[derive(Debug, Clone, PartialEq)]
pub struct DraftDefaults {
    pub status: TakeStatus,
    pub mics: MicLabels,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            status: TakeStatus::Ok,
            mics: Default::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DraftController {
    draft: Draft,
    defaults: DraftDefaults,
}

impl DraftController {
    pub fn new(defaults: DraftDefaults) -> Self {
        Self {
            draft: Draft::new(defaults.status, defaults.mics.clone()),
            defaults,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replace the whole draft (undo/redo restore, edit extraction).
    pub fn restore(&mut self, draft: Draft) {
        self.draft = draft;
    }

    /// Back to a blank draft from defaults.
    pub fn reset(&mut self) {
        self.draft = Draft::new(self.defaults.status, self.defaults.mics.clone());
    }

    /// Apply a field edit.
    pub fn apply(&mut self, action: &DraftAction) {
        let d = &mut self.draft;
        match action {
            DraftAction::SetFileNo(file_no) => d.file_no = file_no.clone(),
            DraftAction::SetScene(n) => d.scene = Numbered::new(*n, d.scene.suffix),
            DraftAction::SetSceneSuffix(s) => d.scene.suffix = *s,
            DraftAction::StepScene(delta) => d.scene = d.scene.step(*delta),
            DraftAction::SetCut(cut) => d.cut = *cut,
            DraftAction::SetCutSuffix(s) => d.cut = d.cut.with_suffix(*s),
            DraftAction::StepCut(delta) => d.cut = d.cut.step(*delta),
            DraftAction::SetTake(n) => d.take = TakeNo(*n),
            DraftAction::StepTake(delta) => d.take = d.take.step(*delta),
            DraftAction::SetStatus(status) => d.status = *status,
            DraftAction::SetMic(slot, label) => {
                if let Some(mic) = d.mics.get_mut(*slot) {
                    *mic = label.clone();
                } else {
                    log::debug!(target: "draft", "ignoring mic slot {} (have {})", slot, MIC_CHANNELS);
                }
            }
            DraftAction::SetNote(note) => d.note = note.clone(),
        }
    }

    /// Validate, insert into `repo`, then advance counters and refresh the
    /// file number against the updated rows.
    pub fn commit(&mut self, repo: &mut TakeRepository, today: NaiveDate) -> Result<TakeId, CommitError> {
        self.draft.validate()?;

        let row = TakeRow::from_draft(&self.draft);
        let id = row.id.clone();
        log::info!(
            target: "draft",
            "commit {} S{} C{} T{} {}",
            row.file_no, row.scene_no, row.cut_no, row.take_no, row.status
        );
        repo.add(row);

        self.advance(self.draft.status);
        self.draft.file_no = next_file_no_on(repo.rows(), today);
        Ok(id)
    }

    /// OK closes out the cut: next cut, no suffix, take 1. NG/KEEP is a
    /// retake of the same cut: take + 1.
    fn advance(&mut self, committed: TakeStatus) {
        let d = &mut self.draft;
        match committed {
            TakeStatus::Ok => {
                d.cut = d.cut.increment().with_suffix(Suffix::None);
                d.take = TakeNo(1);
            }
            TakeStatus::Ng | TakeStatus::Keep => {
                d.take = d.take.step(1);
            }
        }
        d.note.clear();
    }

    /// Scene, cut and take back to 1 (never to "only").
    pub fn reset_counters(&mut self) {
        let d = &mut self.draft;
        d.scene = Numbered::new(1, Suffix::None);
        d.cut = CutNo::number(1);
        d.take = TakeNo(1);
    }

    /// Fill the file number from the sequence generator, but only while the
    /// draft has none. Returns true if it was filled.
    pub fn refresh_file_no(&mut self, rows: &[TakeRow], today: NaiveDate) -> bool {
        if !self.draft.file_no.trim().is_empty() {
            return false;
        }
        self.draft.file_no = next_file_no_on(rows, today);
        true
    }
}
