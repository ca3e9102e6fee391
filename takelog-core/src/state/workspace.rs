//! The set of projects and which one is current.
//!
//! The current project's rows are owned by the take repository while it is
//! current; its entry here holds an empty `rows` until it is switched away
//! from. Persisting takes the live rows as an argument.

use serde_json::Value;

use takelog_types::{locale_cmp, Project, ProjectId, ProjectView, TakeRow};

use crate::interchange::json::decode_rows;

use super::persistence::{load_json, save_json, KvStore, CURRENT_PROJECT_KEY, PROJECTS_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceError {
    NotFound,
    /// At least one project must exist.
    LastProject,
}

impl std::fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no such project"),
            Self::LastProject => write!(f, "cannot delete the only project"),
        }
    }
}

impl std::error::Error for WorkspaceError {}

#[derive(Debug, Clone)]
pub struct Workspace {
    projects: Vec<Project>,
    current: usize,
}

impl Workspace {
    /// A workspace holding one fresh project.
    pub fn new(name: &str) -> Self {
        Self {
            projects: vec![Project::new(name)],
            current: 0,
        }
    }

    /// Load projects and the remembered current id. Falls back to the first
    /// project, or a fresh default project when the store has none.
    pub fn load(store: &dyn KvStore) -> Self {
        let projects = load_projects(store);
        if projects.is_empty() {
            log::info!(target: "workspace", "no saved projects, starting a new one");
            return Self::new("");
        }

        let remembered = store.get(CURRENT_PROJECT_KEY);
        let current = remembered
            .as_deref()
            .and_then(|id| projects.iter().position(|p| p.id.as_str() == id))
            .unwrap_or(0);
        log::info!(target: "workspace", "loaded {} projects, current {}", projects.len(), projects[current].id);
        Self { projects, current }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn current(&self) -> &Project {
        &self.projects[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Project {
        &mut self.projects[self.current]
    }

    pub fn find(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    fn position(&self, id: &ProjectId) -> Option<usize> {
        self.projects.iter().position(|p| &p.id == id)
    }

    /// Move the current project's stored rows out (for the repository).
    pub fn take_current_rows(&mut self) -> Vec<TakeRow> {
        std::mem::take(&mut self.current_mut().rows)
    }

    /// Hand the live rows back to the current project entry.
    pub fn return_current_rows(&mut self, rows: Vec<TakeRow>) {
        self.current_mut().rows = rows;
    }

    /// Add a project without switching to it. Reuses a fresh id if `project`
    /// collides with an existing one.
    pub fn insert(&mut self, mut project: Project) -> ProjectId {
        if self.position(&project.id).is_some() {
            project.id = ProjectId::generate();
        }
        let id = project.id.clone();
        self.projects.push(project);
        id
    }

    /// Make `id` current. The caller must have returned the old current
    /// project's rows first.
    pub fn set_current(&mut self, id: &ProjectId) -> Result<(), WorkspaceError> {
        self.current = self.position(id).ok_or(WorkspaceError::NotFound)?;
        Ok(())
    }

    pub fn rename(&mut self, id: &ProjectId, name: &str) -> Result<(), WorkspaceError> {
        let idx = self.position(id).ok_or(WorkspaceError::NotFound)?;
        let name = name.trim();
        if !name.is_empty() {
            let project = &mut self.projects[idx];
            project.name = name.to_string();
            project.touch();
        }
        Ok(())
    }

    /// Delete a project that is not current.
    pub fn remove(&mut self, id: &ProjectId) -> Result<Project, WorkspaceError> {
        let idx = self.position(id).ok_or(WorkspaceError::NotFound)?;
        if self.projects.len() == 1 {
            return Err(WorkspaceError::LastProject);
        }
        let current_id = self.current().id.clone();
        let removed = self.projects.remove(idx);
        self.current = self.position(&current_id).unwrap_or(0);
        Ok(removed)
    }

    /// Write every project (the current one with `live_rows`) and the
    /// current id back to the store.
    pub fn persist(&self, store: &mut dyn KvStore, live_rows: &[TakeRow]) {
        let views: Vec<ProjectView<'_>> = self
            .projects
            .iter()
            .enumerate()
            .map(|(i, p)| if i == self.current { p.view(live_rows) } else { p.into() })
            .collect();
        save_json(store, PROJECTS_KEY, &views);
        store.set(CURRENT_PROJECT_KEY, self.current().id.as_str());
    }
}

/// Decode the stored project list entry by entry, and each project's rows
/// one by one, so a single bad record does not take the rest down with it.
fn load_projects(store: &dyn KvStore) -> Vec<Project> {
    let Some(items) = load_json::<Vec<Value>>(store, PROJECTS_KEY) else {
        return Vec::new();
    };
    let total = items.len();
    let projects: Vec<Project> = items.into_iter().filter_map(decode_project).collect();
    if projects.len() < total {
        log::warn!(target: "workspace", "skipped {} unreadable projects", total - projects.len());
    }
    projects
}

fn decode_project(value: Value) -> Option<Project> {
    let Value::Object(mut map) = value else {
        log::warn!(target: "workspace", "skipping stored project that is not an object");
        return None;
    };
    let rows = match map.remove("rows") {
        Some(Value::Array(items)) => decode_rows(items),
        _ => Vec::new(),
    };
    match serde_json::from_value::<Project>(Value::Object(map)) {
        Ok(mut project) => {
            project.rows = rows;
            project.rows.sort_by(|a, b| locale_cmp(&a.file_no, &b.file_no));
            Some(project)
        }
        Err(e) => {
            log::warn!(target: "workspace", "skipping unreadable project: {}", e);
            None
        }
    }
}
