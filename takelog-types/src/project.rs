//! Project state: a named, persisted collection of takes.

use serde::{Deserialize, Serialize};

use crate::take::TakeRow;
use crate::{now_iso, ProjectId};

/// Name given to projects created without one.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "ProjectId::generate")]
    pub id: ProjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "now_iso")]
    pub created_at: String,
    #[serde(default = "now_iso")]
    pub updated_at: String,
    #[serde(default)]
    pub rows: Vec<TakeRow>,
}

impl Project {
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        let now = now_iso();
        Self {
            id: ProjectId::generate(),
            name: if name.is_empty() { DEFAULT_PROJECT_NAME.to_string() } else { name.to_string() },
            created_at: now.clone(),
            updated_at: now,
            rows: Vec::new(),
        }
    }

    /// Bump `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = now_iso();
    }

    /// Borrowed view with `rows` taken from elsewhere.
    pub fn view<'a>(&'a self, rows: &'a [TakeRow]) -> ProjectView<'a> {
        ProjectView {
            id: &self.id,
            name: &self.name,
            created_at: &self.created_at,
            updated_at: &self.updated_at,
            rows,
        }
    }
}

/// Serialization-only borrow of a project whose rows may live outside the
/// `Project` value (the current project's rows are owned by the repository).
/// Serializes to the same shape as [`Project`].
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView<'a> {
    pub id: &'a ProjectId,
    pub name: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
    pub rows: &'a [TakeRow],
}

impl<'a> From<&'a Project> for ProjectView<'a> {
    fn from(project: &'a Project) -> Self {
        project.view(&project.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_falls_back() {
        assert_eq!(Project::new("  ").name, DEFAULT_PROJECT_NAME);
        assert_eq!(Project::new(" Day 3 ").name, "Day 3");
    }

    #[test]
    fn view_serializes_like_project() {
        let p = Project::new("Shoot");
        let a = serde_json::to_value(&p).unwrap();
        let b = serde_json::to_value(ProjectView::from(&p)).unwrap();
        assert_eq!(a, b);
    }
}
