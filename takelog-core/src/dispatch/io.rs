use std::collections::HashSet;

use takelog_types::{TakeId, TakeRow};

use crate::interchange::{csv, export_file_name, json, ExportFormat, InterchangeError};
use crate::state::persistence::KvStore;
use crate::state::AppState;

/// An encoded project ready to hand to whatever delivers files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub contents: String,
}

pub fn export_csv(state: &AppState) -> Export {
    let project = state.current_project();
    Export {
        file_name: export_file_name(&project.name, ExportFormat::Csv),
        contents: csv::encode(state.repo.rows()),
    }
}

/// The stored project record carries stale rows while it is current, so the
/// live rows are spliced in here.
pub fn export_json(state: &AppState) -> Result<Export, InterchangeError> {
    let project = state.current_project();
    Ok(Export {
        file_name: export_file_name(&project.name, ExportFormat::Json),
        contents: json::encode(project.view(state.repo.rows()))?,
    })
}

/// Decode CSV text and append its rows to the current project.
pub fn import_csv(state: &mut AppState, store: &mut dyn KvStore, text: &str) -> Result<usize, InterchangeError> {
    let rows = csv::decode(text)?;
    merge(state, store, rows)
}

/// Decode a project JSON document and append its rows to the current
/// project. The imported project's name and id are not kept.
pub fn import_json(state: &mut AppState, store: &mut dyn KvStore, text: &str) -> Result<usize, InterchangeError> {
    let project = json::decode(text)?;
    log::debug!(target: "interchange", "importing rows of {:?}", project.name);
    merge(state, store, project.rows)
}

/// One undo step for the whole batch. Nothing is recorded when there is
/// nothing to add.
fn merge(state: &mut AppState, store: &mut dyn KvStore, mut rows: Vec<TakeRow>) -> Result<usize, InterchangeError> {
    if rows.is_empty() {
        return Err(InterchangeError::Empty);
    }

    let mut seen: HashSet<TakeId> = state.repo.iter().map(|r| r.id.clone()).collect();
    for row in &mut rows {
        while !seen.insert(row.id.clone()) {
            row.id = TakeId::generate();
        }
    }

    state.undo_history.push(&state.repo, &state.draft);
    let added = state.repo.append_imported(rows);
    state.refresh_file_no();
    state.persist(store);
    log::info!(target: "interchange", "imported {} rows into {}", added, state.current_project().name);
    Ok(added)
}
