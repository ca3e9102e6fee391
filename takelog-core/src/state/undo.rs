use std::collections::VecDeque;

use takelog_types::{Action, Draft, TakeRow};

use super::draft::DraftController;
use super::repository::TakeRepository;

/// Full copy of the editable state, taken before a mutating action.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub rows: Vec<TakeRow>,
    pub draft: Draft,
}

impl Snapshot {
    pub fn capture(repo: &TakeRepository, draft: &DraftController) -> Self {
        Self {
            rows: repo.rows().to_vec(),
            draft: draft.draft().clone(),
        }
    }

    fn apply(self, repo: &mut TakeRepository, draft: &mut DraftController) {
        repo.replace_rows(self.rows);
        draft.restore(self.draft);
    }
}

/// Linear undo/redo over `{rows, draft}` snapshots.
pub struct UndoHistory {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    max_depth: usize,
}

impl UndoHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Snapshot the current state before mutating it. Invalidates redo.
    pub fn push(&mut self, repo: &TakeRepository, draft: &DraftController) {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(Snapshot::capture(repo, draft));
        self.redo_stack.clear();
    }

    /// Pop the last snapshot, stash the current state for redo, restore.
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self, repo: &mut TakeRepository, draft: &mut DraftController) -> bool {
        let Some(entry) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push_back(Snapshot::capture(repo, draft));
        entry.apply(repo, draft);
        true
    }

    /// Mirror of [`undo`](Self::undo).
    pub fn redo(&mut self, repo: &mut TakeRepository, draft: &mut DraftController) -> bool {
        let Some(entry) = self.redo_stack.pop_back() else {
            return false;
        };
        self.undo_stack.push_back(Snapshot::capture(repo, draft));
        entry.apply(repo, draft);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

/// Operator-visible mutations record history. Field edits and the reactive
/// file-number refresh do not, and undo/redo manage the stacks themselves.
pub fn is_undoable(action: &Action) -> bool {
    match action {
        Action::Commit | Action::Remove(_) | Action::Edit(_) | Action::ResetCounters => true,
        Action::Draft(_) | Action::Undo | Action::Redo => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::draft::DraftDefaults;
    use chrono::NaiveDate;
    use takelog_types::{DraftAction, TakeId};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 16).unwrap()
    }

    fn setup() -> (TakeRepository, DraftController) {
        let repo = TakeRepository::new();
        let mut draft = DraftController::new(DraftDefaults::default());
        draft.refresh_file_no(repo.rows(), day());
        (repo, draft)
    }

    fn commit(history: &mut UndoHistory, repo: &mut TakeRepository, draft: &mut DraftController) {
        history.push(repo, draft);
        draft.commit(repo, day()).unwrap();
    }

    #[test]
    fn undo_restores_rows_and_draft() {
        let mut history = UndoHistory::new(10);
        let (mut repo, mut draft) = setup();
        let before = Snapshot::capture(&repo, &draft);

        commit(&mut history, &mut repo, &mut draft);
        assert_eq!(repo.len(), 1);

        assert!(history.undo(&mut repo, &mut draft));
        assert_eq!(Snapshot::capture(&repo, &draft), before);
        assert!(!history.undo(&mut repo, &mut draft));
    }

    #[test]
    fn redo_reapplies() {
        let mut history = UndoHistory::new(10);
        let (mut repo, mut draft) = setup();
        commit(&mut history, &mut repo, &mut draft);
        let after = Snapshot::capture(&repo, &draft);

        history.undo(&mut repo, &mut draft);
        assert!(history.can_redo());
        assert!(history.redo(&mut repo, &mut draft));
        assert_eq!(Snapshot::capture(&repo, &draft), after);
        assert!(!history.redo(&mut repo, &mut draft));
    }

    #[test]
    fn new_action_clears_redo() {
        let mut history = UndoHistory::new(10);
        let (mut repo, mut draft) = setup();
        commit(&mut history, &mut repo, &mut draft);
        history.undo(&mut repo, &mut draft);
        assert!(history.can_redo());

        history.push(&repo, &draft);
        draft.reset_counters();
        assert!(!history.can_redo());
        assert!(!history.redo(&mut repo, &mut draft));
    }

    #[test]
    fn snapshots_do_not_alias_live_state() {
        let mut history = UndoHistory::new(10);
        let (mut repo, mut draft) = setup();
        history.push(&repo, &draft);
        draft.apply(&DraftAction::SetNote("changed".into()));
        draft.commit(&mut repo, day()).unwrap();

        history.undo(&mut repo, &mut draft);
        assert!(repo.is_empty());
        assert_eq!(draft.draft().note, "");
    }

    #[test]
    fn max_depth_drops_oldest() {
        let mut history = UndoHistory::new(2);
        let (mut repo, mut draft) = setup();
        for _ in 0..3 {
            commit(&mut history, &mut repo, &mut draft);
        }
        assert_eq!(history.undo_depth(), 2);
        assert!(history.undo(&mut repo, &mut draft));
        assert!(history.undo(&mut repo, &mut draft));
        assert!(!history.undo(&mut repo, &mut draft));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn undoable_actions() {
        assert!(is_undoable(&Action::Commit));
        assert!(is_undoable(&Action::Remove(TakeId::new("x"))));
        assert!(is_undoable(&Action::Edit(TakeId::new("x"))));
        assert!(is_undoable(&Action::ResetCounters));
        assert!(!is_undoable(&Action::Draft(DraftAction::StepTake(1))));
        assert!(!is_undoable(&Action::Undo));
        assert!(!is_undoable(&Action::Redo));
    }
}
