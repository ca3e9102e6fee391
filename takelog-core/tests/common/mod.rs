#![allow(dead_code)]

use chrono::NaiveDate;
use takelog_core::config::Config;
use takelog_core::dispatch::dispatch_action;
use takelog_core::state::{AppState, KvStore, MemoryStore};
use takelog_types::{Action, CutNo, DispatchResult, DraftAction, TakeStatus};

pub fn shoot_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 16).unwrap()
}

/// Fresh state pinned to [`shoot_day`], backed by an in-memory store.
pub fn make_test_state() -> (AppState, MemoryStore) {
    let mut state = AppState::new(&Config::from_overrides(""));
    state.set_fixed_day(Some(shoot_day()));
    (state, MemoryStore::new())
}

pub fn edit(state: &mut AppState, store: &mut dyn KvStore, action: DraftAction) {
    dispatch_action(&Action::Draft(action), state, store);
}

/// Set scene/cut/take/status on the draft and commit it.
pub fn log_take(
    state: &mut AppState,
    store: &mut dyn KvStore,
    scene: u32,
    cut: CutNo,
    take: u32,
    status: TakeStatus,
) -> DispatchResult {
    edit(state, store, DraftAction::SetScene(scene));
    edit(state, store, DraftAction::SetCut(cut));
    edit(state, store, DraftAction::SetTake(take));
    edit(state, store, DraftAction::SetStatus(status));
    dispatch_action(&Action::Commit, state, store)
}
