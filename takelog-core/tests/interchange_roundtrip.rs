mod common;

use takelog_core::dispatch::{export_csv, export_json, import_csv, import_json};
use takelog_core::interchange::csv;
use takelog_types::{CutNo, DraftAction, TakeStatus};

#[test]
fn test_csv_round_trip_preserves_all_but_ids() {
    let (mut state, mut store) = common::make_test_state();
    common::edit(&mut state, &mut store, DraftAction::SetMic(0, "Boom".into()));
    common::edit(&mut state, &mut store, DraftAction::SetMic(7, "Lav, \"Bob\"".into()));
    common::edit(&mut state, &mut store, DraftAction::SetNote("line one\nline two".into()));
    common::log_take(&mut state, &mut store, 12, CutNo::Only, 3, TakeStatus::Ng);
    common::log_take(&mut state, &mut store, 12, CutNo::number(4), 1, TakeStatus::Ok);

    let exported = export_csv(&state);
    let decoded = csv::decode(&exported.contents).unwrap();
    assert_eq!(decoded.len(), state.repo.len());

    for (orig, back) in state.repo.rows().iter().zip(&decoded) {
        assert_ne!(orig.id, back.id);
        assert_eq!(orig.created_at, back.created_at);
        assert_eq!(orig.file_no, back.file_no);
        assert_eq!(orig.scene_no, back.scene_no);
        assert_eq!(orig.cut_no, back.cut_no);
        assert_eq!(orig.take_no, back.take_no);
        assert_eq!(orig.status, back.status);
        assert_eq!(orig.mics, back.mics);
    }
    assert_eq!(decoded[0].note, "line one line two");
    assert_eq!(decoded[0].mics[7], "Lav, \"Bob\"");
}

#[test]
fn test_csv_import_into_second_project() {
    let (mut source, mut source_store) = common::make_test_state();
    common::log_take(&mut source, &mut source_store, 1, CutNo::number(1), 1, TakeStatus::Ok);
    let exported = export_csv(&source);

    let (mut target, mut target_store) = common::make_test_state();
    common::log_take(&mut target, &mut target_store, 9, CutNo::number(9), 9, TakeStatus::Keep);
    let added = import_csv(&mut target, &mut target_store, &exported.contents).unwrap();
    assert_eq!(added, 1);
    assert_eq!(target.repo.len(), 2);
}

#[test]
fn test_json_export_imports_structurally() {
    let (mut state, mut store) = common::make_test_state();
    common::log_take(&mut state, &mut store, 2, CutNo::number(1), 1, TakeStatus::Ok);
    let exported = export_json(&state).unwrap();
    assert_eq!(exported.file_name, "Untitled.json");

    let (mut other, mut other_store) = common::make_test_state();
    import_json(&mut other, &mut other_store, &exported.contents).unwrap();
    let (a, b) = (&state.repo.rows()[0], &other.repo.rows()[0]);
    assert_eq!(a.id, b.id);
    assert_eq!(a.file_no, b.file_no);
    assert_eq!(a.updated_at, b.updated_at);
}
