use std::path::{Path, PathBuf};

use takelog_core::dispatch::{dispatch_action, export_csv, export_json, import_csv, import_json, Export};
use takelog_core::interchange::ExportFormat;
use takelog_core::state::{AppState, KvStore};
use takelog_types::{Action, DispatchResult, DraftAction, ProjectId, StatusEvent, TakeId, TakeRow};

use crate::args::{Command, LogArgs};

pub fn run(command: Command, state: &mut AppState, store: &mut dyn KvStore) -> Result<(), String> {
    match command {
        Command::Projects => {
            let current = &state.current_project().id;
            for p in state.workspace.projects() {
                let marker = if &p.id == current { '*' } else { ' ' };
                let count = if &p.id == current { state.repo.len() } else { p.rows.len() };
                println!("{} {}  {}  ({} takes)", marker, p.id, p.name, count);
            }
        }
        Command::New(name) => {
            let id = state.create_project(&name, store);
            println!("created {} ({})", state.current_project().name, id);
        }
        Command::Use(id) => {
            state
                .switch_project(&ProjectId::new(id), store)
                .map_err(|e| e.to_string())?;
            println!("now on {}", state.current_project().name);
        }
        Command::Rename(id, name) => {
            state
                .rename_project(&ProjectId::new(id), &name, store)
                .map_err(|e| e.to_string())?;
        }
        Command::Drop(id) => {
            let removed = state
                .delete_project(&ProjectId::new(id), store)
                .map_err(|e| e.to_string())?;
            println!("deleted {} ({} takes)", removed.name, removed.rows.len());
        }
        Command::List { status, query } => {
            for row in state.repo.filter(&query, status) {
                println!("{}", format_row(row));
            }
        }
        Command::Log(log) => {
            for action in draft_actions(log) {
                dispatch_action(&Action::Draft(action), state, store);
            }
            report(&dispatch_action(&Action::Commit, state, store))?;
        }
        Command::Remove(id) => {
            report(&dispatch_action(&Action::Remove(TakeId::new(id)), state, store))?;
        }
        Command::Export { format, path } => {
            let export = match format {
                ExportFormat::Csv => export_csv(state),
                ExportFormat::Json => export_json(state).map_err(|e| e.to_string())?,
            };
            let written = write_export(&export, path)?;
            println!("wrote {}", written.display());
        }
        Command::Import(path) => {
            let text = std::fs::read_to_string(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
            let added = if is_json(&path) {
                import_json(state, store, &text)
            } else {
                import_csv(state, store, &text)
            }
            .map_err(|e| e.to_string())?;
            println!("imported {} takes into {}", added, state.current_project().name);
        }
    }
    Ok(())
}

fn draft_actions(log: LogArgs) -> Vec<DraftAction> {
    let mut actions = Vec::new();
    if let Some(file_no) = log.file_no {
        actions.push(DraftAction::SetFileNo(file_no));
    }
    if let Some(scene) = log.scene {
        actions.push(DraftAction::SetScene(scene.number));
        actions.push(DraftAction::SetSceneSuffix(scene.suffix));
    }
    if let Some(cut) = log.cut {
        actions.push(DraftAction::SetCut(cut));
    }
    if let Some(take) = log.take {
        actions.push(DraftAction::SetTake(take.0));
    }
    if let Some(status) = log.status {
        actions.push(DraftAction::SetStatus(status));
    }
    actions.extend(log.mics.into_iter().map(|(slot, label)| DraftAction::SetMic(slot, label)));
    if let Some(note) = log.note {
        actions.push(DraftAction::SetNote(note));
    }
    actions
}

fn report(result: &DispatchResult) -> Result<(), String> {
    for event in &result.status {
        match event {
            StatusEvent::Committed { id, file_no } => println!("logged {} ({})", file_no, id),
            StatusEvent::Removed(id) => println!("removed {}", id),
            StatusEvent::Rejected(e) => return Err(e.to_string()),
            StatusEvent::NotFound(id) => return Err(format!("no take with id {}", id)),
            other => log::debug!("{:?}", other),
        }
    }
    Ok(())
}

fn format_row(row: &TakeRow) -> String {
    let mics: Vec<&str> = row.mics.iter().map(String::as_str).filter(|m| !m.is_empty()).collect();
    format!(
        "{:<12} S{:<4} C{:<5} T{:<3} {:<4} {:<24} {}  [{}]",
        row.file_no,
        row.scene_no,
        row.cut_no,
        row.take_no,
        row.status.as_str(),
        mics.join(","),
        row.note,
        row.id
    )
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn write_export(export: &Export, path: Option<PathBuf>) -> Result<PathBuf, String> {
    let path = match path {
        Some(p) if p.is_dir() => p.join(&export.file_name),
        Some(p) => p,
        None => PathBuf::from(&export.file_name),
    };
    std::fs::write(&path, &export.contents).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(path)
}
