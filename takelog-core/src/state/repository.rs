//! In-memory take list for the current project.
//!
//! Rows are always kept in canonical order (ascending file number under
//! [`locale_cmp`]); every mutation re-sorts before returning.

use takelog_types::{locale_cmp, Draft, TakeId, TakeRow, TakeStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TakeRepository {
    rows: Vec<TakeRow>,
    /// Bumped on every mutation so callers can tell whether rows changed.
    revision: u64,
}

impl TakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<TakeRow>) -> Self {
        let mut repo = Self { rows, revision: 0 };
        repo.sort();
        repo
    }

    pub fn rows(&self) -> &[TakeRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &TakeRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &TakeId) -> Option<&TakeRow> {
        self.rows.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &TakeId) -> bool {
        self.get(id).is_some()
    }

    /// Insert and re-sort. Equal file numbers keep insertion order.
    pub fn add(&mut self, row: TakeRow) {
        self.rows.push(row);
        self.sort();
        self.bump();
    }

    /// Import merge: each row goes through `add`, after everything already present.
    pub fn append_imported(&mut self, rows: impl IntoIterator<Item = TakeRow>) -> usize {
        let mut added = 0;
        for row in rows {
            self.add(row);
            added += 1;
        }
        added
    }

    /// The row `remove(id)` would delete, without deleting it.
    pub fn would_remove(&self, id: &TakeId) -> Option<&TakeRow> {
        self.get(id)
    }

    pub fn remove(&mut self, id: &TakeId) -> Option<TakeRow> {
        let idx = self.rows.iter().position(|r| &r.id == id)?;
        let row = self.rows.remove(idx);
        self.sort();
        self.bump();
        Some(row)
    }

    /// Pop a row for re-editing, reshaped into draft form. The row is gone
    /// from the list until the draft is committed again.
    pub fn take_for_edit(&mut self, id: &TakeId) -> Option<Draft> {
        self.remove(id).map(|row| Draft::from_row(&row))
    }

    /// Rows matching a case-insensitive text query AND an optional exact status.
    pub fn filter(&self, query: &str, status: Option<TakeStatus>) -> Vec<&TakeRow> {
        let needle = query.trim().to_lowercase();
        self.rows
            .iter()
            .filter(|row| row.matches(&needle, status))
            .collect()
    }

    /// Swap in a whole row list (undo/redo restore, project switch).
    pub fn replace_rows(&mut self, rows: Vec<TakeRow>) {
        self.rows = rows;
        self.sort();
        self.bump();
    }

    fn sort(&mut self) {
        self.rows.sort_by(|a, b| locale_cmp(&a.file_no, &b.file_no));
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
