mod common;

use takelog_core::dispatch::{dispatch_action, import_json};
use takelog_core::interchange::InterchangeError;
use takelog_core::state::{AppState, Snapshot, SqliteStore};
use takelog_core::config::Config;
use takelog_types::{Action, CutNo, DraftAction, StatusEvent, TakeNo, TakeStatus};

#[test]
fn test_ok_commit_closes_the_cut() {
    let (mut state, mut store) = common::make_test_state();
    let result = common::log_take(&mut state, &mut store, 3, CutNo::number(2), 4, TakeStatus::Ok);
    assert!(matches!(result.status[0], StatusEvent::Committed { .. }));

    let row = &state.repo.rows()[0];
    assert_eq!((row.scene_no.as_str(), row.cut_no.as_str(), row.take_no.as_str()), ("3", "2", "4"));

    let draft = state.draft.draft();
    assert_eq!(draft.scene.token(), "3");
    assert_eq!(draft.cut, CutNo::number(3));
    assert_eq!(draft.take, TakeNo(1));
    assert_eq!(draft.file_no, "241016_002");
}

#[test]
fn test_ok_commit_at_cut_one_moves_to_cut_two() {
    let (mut state, mut store) = common::make_test_state();
    common::log_take(&mut state, &mut store, 1, CutNo::number(1), 1, TakeStatus::Ok);
    let draft = state.draft.draft();
    assert_eq!(draft.cut, CutNo::number(2));
    assert!(!draft.cut.is_only());
    assert_eq!(draft.take, TakeNo(1));
}

#[test]
fn test_ng_commit_is_a_retake() {
    let (mut state, mut store) = common::make_test_state();
    common::log_take(&mut state, &mut store, 1, CutNo::number(5), 2, TakeStatus::Ng);
    let draft = state.draft.draft();
    assert_eq!(draft.cut, CutNo::number(5));
    assert_eq!(draft.take, TakeNo(3));
    assert_eq!(draft.status, TakeStatus::Ng);
}

#[test]
fn test_only_cut_round_trips_through_rows() {
    let (mut state, mut store) = common::make_test_state();
    common::log_take(&mut state, &mut store, 7, CutNo::Only, 1, TakeStatus::Ok);
    assert_eq!(state.repo.rows()[0].cut_no, "only");
    assert_eq!(state.draft.draft().cut, CutNo::number(1));

    common::edit(&mut state, &mut store, DraftAction::StepCut(-1));
    assert_eq!(state.draft.draft().cut, CutNo::Only);
}

#[test]
fn test_undo_walks_back_every_commit() {
    let (mut state, mut store) = common::make_test_state();
    let initial = state.draft.draft().clone();
    for take in 1..=5 {
        common::log_take(&mut state, &mut store, 1, CutNo::number(1), take, TakeStatus::Ng);
    }
    assert_eq!(state.repo.len(), 5);

    for remaining in (0..5).rev() {
        let result = dispatch_action(&Action::Undo, &mut state, &mut store);
        assert_eq!(result.status, [StatusEvent::Undone]);
        assert_eq!(state.repo.len(), remaining);
    }
    assert_eq!(state.draft.draft().file_no, initial.file_no);

    for expected in 1..=5 {
        dispatch_action(&Action::Redo, &mut state, &mut store);
        assert_eq!(state.repo.len(), expected);
    }
}

#[test]
fn test_mixed_mutations_undo_to_exact_start() {
    let (mut state, mut store) = common::make_test_state();
    common::edit(&mut state, &mut store, DraftAction::SetScene(4));
    common::edit(&mut state, &mut store, DraftAction::SetNote("boom in shot".into()));
    let start = Snapshot::capture(&state.repo, &state.draft);
    let mut after = Vec::new();

    dispatch_action(&Action::Commit, &mut state, &mut store);
    after.push(Snapshot::capture(&state.repo, &state.draft));
    let first = state.repo.rows()[0].id.clone();

    dispatch_action(&Action::Commit, &mut state, &mut store);
    assert_eq!(state.repo.len(), 2);
    dispatch_action(&Action::Undo, &mut state, &mut store);
    assert_eq!(Snapshot::capture(&state.repo, &state.draft), after[0]);

    dispatch_action(&Action::Commit, &mut state, &mut store);
    after.push(Snapshot::capture(&state.repo, &state.draft));
    let second = state.repo.rows()[1].id.clone();

    dispatch_action(&Action::Remove(first), &mut state, &mut store);
    after.push(Snapshot::capture(&state.repo, &state.draft));

    dispatch_action(&Action::ResetCounters, &mut state, &mut store);
    after.push(Snapshot::capture(&state.repo, &state.draft));

    dispatch_action(&Action::Edit(second), &mut state, &mut store);
    after.push(Snapshot::capture(&state.repo, &state.draft));
    assert!(state.repo.is_empty());

    for expected in after.iter().rev().skip(1).chain(std::iter::once(&start)) {
        let result = dispatch_action(&Action::Undo, &mut state, &mut store);
        assert_eq!(result.status, [StatusEvent::Undone]);
        assert_eq!(&Snapshot::capture(&state.repo, &state.draft), expected);
    }
    let result = dispatch_action(&Action::Undo, &mut state, &mut store);
    assert_eq!(result.status, [StatusEvent::NothingToUndo]);

    for expected in &after {
        let result = dispatch_action(&Action::Redo, &mut state, &mut store);
        assert_eq!(result.status, [StatusEvent::Redone]);
        assert_eq!(&Snapshot::capture(&state.repo, &state.draft), expected);
    }

    dispatch_action(&Action::Undo, &mut state, &mut store);
    dispatch_action(&Action::Undo, &mut state, &mut store);
    dispatch_action(&Action::ResetCounters, &mut state, &mut store);
    let result = dispatch_action(&Action::Redo, &mut state, &mut store);
    assert_eq!(result.status, [StatusEvent::NothingToRedo]);
}

#[test]
fn test_new_commit_discards_redo() {
    let (mut state, mut store) = common::make_test_state();
    common::log_take(&mut state, &mut store, 1, CutNo::number(1), 1, TakeStatus::Ok);
    dispatch_action(&Action::Undo, &mut state, &mut store);
    assert!(state.undo_history.can_redo());

    common::log_take(&mut state, &mut store, 2, CutNo::number(1), 1, TakeStatus::Ok);
    assert!(!state.undo_history.can_redo());
    let result = dispatch_action(&Action::Redo, &mut state, &mut store);
    assert_eq!(result.status, [StatusEvent::NothingToRedo]);
}

#[test]
fn test_malformed_json_import_keeps_rows() {
    let (mut state, mut store) = common::make_test_state();
    common::log_take(&mut state, &mut store, 1, CutNo::number(1), 1, TakeStatus::Ok);
    let before = state.repo.rows().to_vec();

    let err = import_json(&mut state, &mut store, "\"not an object\"").unwrap_err();
    assert!(matches!(err, InterchangeError::Malformed(_)));
    assert_eq!(state.repo.rows(), &before[..]);
}

#[test]
fn test_session_survives_reopening_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("takelog.sqlite");
    let config = Config::from_overrides("");

    let project_id = {
        let mut store = SqliteStore::open(&path).unwrap();
        let mut state = AppState::load(&config, &store);
        state.set_fixed_day(Some(common::shoot_day()));
        common::edit(&mut state, &mut store, DraftAction::SetNote("plane overhead".into()));
        common::log_take(&mut state, &mut store, 2, CutNo::number(1), 1, TakeStatus::Keep);
        state.current_project().id.clone()
    };

    let store = SqliteStore::open(&path).unwrap();
    let state = AppState::load(&config, &store);
    assert_eq!(state.current_project().id, project_id);
    assert_eq!(state.repo.len(), 1);
    assert_eq!(state.repo.rows()[0].note, "plane overhead");
    assert_eq!(state.repo.rows()[0].status, TakeStatus::Keep);
}
