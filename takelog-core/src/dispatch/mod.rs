mod io;

pub use io::{export_csv, export_json, import_csv, import_json, Export};

use crate::state::persistence::KvStore;
use crate::state::undo::is_undoable;
use crate::state::AppState;
use takelog_types::{Action, DispatchResult, StatusEvent, TakeId};

/// Dispatch an action. Returns a DispatchResult describing what happened for
/// the UI layer.
///
/// Undoable actions push a snapshot before mutating, but only when they will
/// actually change something: a rejected commit or an unknown id leaves both
/// the rows and the redo branch alone. After the reducer runs, the draft's
/// file number is re-derived (without recording history) and, if rows
/// changed, the project is written back to `store`.
pub fn dispatch_action(action: &Action, state: &mut AppState, store: &mut dyn KvStore) -> DispatchResult {
    if let Some(rejected) = precheck(action, state) {
        log::debug!(target: "dispatch", "{:?} rejected: {:?}", action, rejected);
        return DispatchResult::with_status(rejected);
    }

    if is_undoable(action) {
        state.undo_history.push(&state.repo, &state.draft);
    }

    let revision = state.repo.revision();
    let mut result = match action {
        Action::Draft(a) => {
            state.draft.apply(a);
            DispatchResult::none()
        }
        Action::Commit => dispatch_commit(state),
        Action::Remove(id) => dispatch_remove(id, state),
        Action::Edit(id) => dispatch_edit(id, state),
        Action::ResetCounters => {
            state.draft.reset_counters();
            DispatchResult::with_status(StatusEvent::CountersReset)
        }
        Action::Undo => {
            if state.undo_history.undo(&mut state.repo, &mut state.draft) {
                DispatchResult::with_status(StatusEvent::Undone)
            } else {
                DispatchResult::with_status(StatusEvent::NothingToUndo)
            }
        }
        Action::Redo => {
            if state.undo_history.redo(&mut state.repo, &mut state.draft) {
                DispatchResult::with_status(StatusEvent::Redone)
            } else {
                DispatchResult::with_status(StatusEvent::NothingToRedo)
            }
        }
    };

    if state.repo.revision() != revision {
        state.refresh_file_no();
        state.persist(store);
        result.rows_changed = true;
    }
    result
}

/// Reasons an undoable action would be a no-op, checked before any snapshot.
fn precheck(action: &Action, state: &AppState) -> Option<StatusEvent> {
    match action {
        Action::Commit => state.draft.draft().validate().err().map(StatusEvent::Rejected),
        Action::Remove(id) | Action::Edit(id) if !state.repo.contains(id) => {
            Some(StatusEvent::NotFound(id.clone()))
        }
        _ => None,
    }
}

fn dispatch_commit(state: &mut AppState) -> DispatchResult {
    let today = state.today();
    match state.draft.commit(&mut state.repo, today) {
        Ok(id) => {
            let file_no = state
                .repo
                .get(&id)
                .map(|r| r.file_no.clone())
                .unwrap_or_default();
            DispatchResult::with_status(StatusEvent::Committed { id, file_no })
        }
        Err(e) => DispatchResult::with_status(StatusEvent::Rejected(e)),
    }
}

fn dispatch_remove(id: &TakeId, state: &mut AppState) -> DispatchResult {
    match state.repo.remove(id) {
        Some(row) => {
            log::info!(target: "dispatch", "removed take {} ({})", row.id, row.file_no);
            DispatchResult::with_status(StatusEvent::Removed(row.id))
        }
        None => DispatchResult::with_status(StatusEvent::NotFound(id.clone())),
    }
}

/// Pull the row into the draft. The row stays out of the list until the
/// draft is committed again.
fn dispatch_edit(id: &TakeId, state: &mut AppState) -> DispatchResult {
    match state.repo.take_for_edit(id) {
        Some(draft) => {
            state.draft.restore(draft);
            DispatchResult::with_status(StatusEvent::Editing(id.clone()))
        }
        None => DispatchResult::with_status(StatusEvent::NotFound(id.clone())),
    }
}
