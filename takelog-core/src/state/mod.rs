pub mod draft;
pub mod persistence;
pub mod preferences;
pub mod repository;
pub mod sequence;
pub mod undo;
pub mod workspace;

pub use draft::{DraftController, DraftDefaults};
pub use persistence::{KvStore, MemoryStore, SqliteStore};
pub use preferences::{Handedness, Preferences, Theme};
pub use repository::TakeRepository;
pub use undo::{Snapshot, UndoHistory};
pub use workspace::{Workspace, WorkspaceError};

use chrono::{Local, NaiveDate};

use crate::config::Config;
use takelog_types::{DraftAction, Project, ProjectId, TakeRow};

/// Top-level engine state, owned by the front end and passed to dispatch.
pub struct AppState {
    pub workspace: Workspace,
    /// Rows of the current project.
    pub repo: TakeRepository,
    pub draft: DraftController,
    /// Undo/redo history for the current project only.
    pub undo_history: UndoHistory,
    pub preferences: Preferences,
    /// Pins "today" for file numbering (tests, replays). `None` = local clock.
    fixed_day: Option<NaiveDate>,
}

impl AppState {
    /// Fresh state with a single new project; nothing is read from storage.
    pub fn new(config: &Config) -> Self {
        Self::from_parts(config, Workspace::new(""), Preferences::default())
    }

    /// Restore projects, current project and preferences from `store`.
    pub fn load(config: &Config, store: &dyn KvStore) -> Self {
        Self::from_parts(config, Workspace::load(store), Preferences::load(store))
    }

    fn from_parts(config: &Config, mut workspace: Workspace, preferences: Preferences) -> Self {
        let repo = TakeRepository::from_rows(workspace.take_current_rows());
        let mut state = Self {
            workspace,
            repo,
            draft: DraftController::new(config.draft_defaults()),
            undo_history: UndoHistory::new(config.history_depth()),
            preferences,
            fixed_day: None,
        };
        state.refresh_file_no();
        state
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_day.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Pin the calendar day used for file numbers. An auto-filled draft file
    /// number is re-derived for the new day; a typed one is left alone.
    pub fn set_fixed_day(&mut self, day: Option<NaiveDate>) {
        let auto = sequence::next_file_no_on(self.repo.rows(), self.today());
        self.fixed_day = day;
        if self.draft.draft().file_no == auto {
            self.draft.apply(&DraftAction::SetFileNo(String::new()));
            self.refresh_file_no();
        }
    }

    pub fn current_project(&self) -> &Project {
        self.workspace.current()
    }

    /// Reactive file-number fill. Never records history.
    pub fn refresh_file_no(&mut self) -> bool {
        let today = self.today();
        self.draft.refresh_file_no(self.repo.rows(), today)
    }

    /// Write the current project (with its `updatedAt` bumped) and the
    /// project list back to the store.
    pub fn persist(&mut self, store: &mut dyn KvStore) {
        self.workspace.current_mut().touch();
        self.workspace.persist(store, self.repo.rows());
    }

    /// Create a project and switch to it.
    pub fn create_project(&mut self, name: &str, store: &mut dyn KvStore) -> ProjectId {
        let id = self.workspace.insert(Project::new(name));
        log::info!(target: "workspace", "created project {}", id);
        // Freshly inserted, so the switch cannot miss.
        let _ = self.switch_project(&id, store);
        id
    }

    /// Make another project current. Clears undo history and re-primes the draft.
    pub fn switch_project(&mut self, id: &ProjectId, store: &mut dyn KvStore) -> Result<(), WorkspaceError> {
        if self.workspace.find(id).is_none() {
            return Err(WorkspaceError::NotFound);
        }
        let live: Vec<TakeRow> = self.repo.rows().to_vec();
        self.workspace.return_current_rows(live);
        self.workspace.set_current(id)?;
        self.repo.replace_rows(self.workspace.take_current_rows());
        self.undo_history.clear();
        self.draft.reset();
        self.refresh_file_no();
        self.workspace.persist(store, self.repo.rows());
        log::info!(target: "workspace", "switched to project {}", id);
        Ok(())
    }

    pub fn rename_project(&mut self, id: &ProjectId, name: &str, store: &mut dyn KvStore) -> Result<(), WorkspaceError> {
        self.workspace.rename(id, name)?;
        self.workspace.persist(store, self.repo.rows());
        Ok(())
    }

    /// Delete a project. Deleting the current one switches to another first.
    pub fn delete_project(&mut self, id: &ProjectId, store: &mut dyn KvStore) -> Result<Project, WorkspaceError> {
        if self.workspace.projects().len() <= 1 {
            return Err(WorkspaceError::LastProject);
        }
        if &self.current_project().id == id {
            let other = self
                .workspace
                .projects()
                .iter()
                .find(|p| &p.id != id)
                .map(|p| p.id.clone())
                .ok_or(WorkspaceError::LastProject)?;
            self.switch_project(&other, store)?;
        }
        let removed = self.workspace.remove(id)?;
        self.workspace.persist(store, self.repo.rows());
        log::info!(target: "workspace", "deleted project {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    pub fn set_preferences(&mut self, preferences: Preferences, store: &mut dyn KvStore) {
        self.preferences = preferences;
        preferences.save(store);
    }
}
