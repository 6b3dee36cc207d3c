//! In-memory table state shared by the roster and access-log views:
//! search, pagination and row selection over a full collection snapshot.

use crate::errors::AppError;

pub const DEFAULT_ROWS_PER_PAGE: usize = 5;

/// A row that can be listed, searched and selected.
pub trait Record {
    fn id(&self) -> &str;

    /// `needle` is already lower-cased and non-empty.
    fn matches(&self, needle: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckbox {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Result of a bulk operation: every request settles, failures do not stop
/// the others.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub done: Vec<String>,
    pub failed: Vec<(String, AppError)>,
}

impl BulkOutcome {
    pub fn requested(&self) -> usize {
        self.done.len() + self.failed.len()
    }
}

#[derive(Debug, Clone)]
pub struct TableView<T> {
    rows: Vec<T>,
    selected: Vec<String>,
    page: usize,
    rows_per_page: usize,
    search: String,
}

impl<T: Record> TableView<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            selected: Vec::new(),
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            search: String::new(),
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.rows.iter().find(|r| r.id() == id)
    }

    // ---------------------------
    // Search
    // ---------------------------

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Rows matching the search term (case-insensitive substring).
    pub fn filtered(&self) -> Vec<&T> {
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return self.rows.iter().collect();
        }
        self.rows.iter().filter(|r| r.matches(&needle)).collect()
    }

    // ---------------------------
    // Pagination
    // ---------------------------

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changing the page size always goes back to the first page.
    pub fn set_rows_per_page(&mut self, n: usize) {
        self.rows_per_page = n.max(1);
        self.page = 0;
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.rows_per_page)
    }

    /// The visible slice of the filtered rows.
    pub fn page_rows(&self) -> Vec<&T> {
        self.filtered()
            .into_iter()
            .skip(self.page * self.rows_per_page)
            .take(self.rows_per_page)
            .collect()
    }

    // ---------------------------
    // Selection
    // ---------------------------

    pub fn toggle_row(&mut self, id: &str) {
        if self.is_selected(id) {
            self.selected.retain(|s| s != id);
        } else {
            self.selected.push(id.to_string());
        }
    }

    /// Add `id` to the selection; selecting twice keeps it selected.
    pub fn select_row(&mut self, id: &str) {
        if !self.is_selected(id) {
            self.selected.push(id.to_string());
        }
    }

    /// Select every row of the snapshot (not only the filtered ones), or clear.
    pub fn select_all(&mut self, checked: bool) {
        self.selected = if checked {
            self.rows.iter().map(|r| r.id().to_string()).collect()
        } else {
            Vec::new()
        };
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn header_checkbox(&self) -> HeaderCheckbox {
        let n = self.selected.len();
        if n == 0 {
            HeaderCheckbox::Unchecked
        } else if n == self.rows.len() {
            HeaderCheckbox::Checked
        } else {
            HeaderCheckbox::Indeterminate
        }
    }

    // ---------------------------
    // Local mutations (mirror of remote writes)
    // ---------------------------

    pub fn push(&mut self, row: T) {
        self.rows.push(row);
    }

    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut T)) -> bool {
        match self.rows.iter_mut().find(|r| r.id() == id) {
            Some(row) => {
                f(row);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.rows.iter().position(|r| r.id() == id)?;
        self.selected.retain(|s| s != id);
        Some(self.rows.remove(idx))
    }

    /// Issue `delete` for every selected id, wait for all of them, drop the
    /// rows that were deleted, then clear the selection.
    pub fn delete_selected<F>(&mut self, mut delete: F) -> BulkOutcome
    where
        F: FnMut(&str) -> Result<(), AppError>,
    {
        let ids = std::mem::take(&mut self.selected);
        let mut outcome = BulkOutcome::default();

        for id in ids {
            match delete(&id) {
                Ok(()) => outcome.done.push(id),
                Err(e) => outcome.failed.push((id, e)),
            }
        }

        for id in &outcome.done {
            self.remove(id);
        }
        self.clear_selection();

        outcome
    }
}
