//! Access-logs page: check-in/check-out records from the `Access` collection.

use super::Backend;
use super::table::{BulkOutcome, Record, TableView};
use crate::backend::store::ACCESS;
use crate::db::log::audit_quiet;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, export_access_logs};
use crate::models::access_log::{AccessLog, AccessLogRow};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

impl Record for AccessLogRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.position.to_lowercase().contains(needle)
    }
}

/// Newest check-in first; records without a check-in go last.
fn by_checkin_desc(a: &AccessLog, b: &AccessLog) -> Ordering {
    match (a.checkin, b.checkin) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Fetch and parse the whole `Access` collection, unsorted.
pub fn fetch_access_logs(b: &Backend) -> AppResult<Vec<AccessLog>> {
    let docs = b.store.get_all(ACCESS)?;
    Ok(docs.iter().map(AccessLog::from_document).collect())
}

pub struct AccessLogsPage<'a> {
    backend: Backend<'a>,
    pub table: TableView<AccessLogRow>,
}

impl<'a> AccessLogsPage<'a> {
    pub fn load(backend: Backend<'a>) -> AppResult<Self> {
        let mut logs = fetch_access_logs(&backend)?;
        logs.sort_by(by_checkin_desc);

        let rows = logs.iter().map(AccessLog::to_row).collect();
        Ok(Self {
            backend,
            table: TableView::new(rows),
        })
    }

    pub fn delete(&mut self, id: &str) -> AppResult<AccessLogRow> {
        if self.table.find(id).is_none() {
            return Err(AppError::UnknownAccessLog(id.to_string()));
        }

        self.backend.store.delete(ACCESS, id)?;
        let removed = self
            .table
            .remove(id)
            .ok_or_else(|| AppError::UnknownAccessLog(id.to_string()))?;

        audit_quiet(
            self.backend.audit,
            "del",
            id,
            &format!("Deleted access log of {}", removed.name),
        );
        Ok(removed)
    }

    pub fn delete_selected(&mut self) -> BulkOutcome {
        let store = self.backend.store;
        let outcome = self.table.delete_selected(|id| store.delete(ACCESS, id));

        audit_quiet(
            self.backend.audit,
            "del",
            ACCESS,
            &format!(
                "Bulk delete: {} of {} removed",
                outcome.done.len(),
                outcome.requested()
            ),
        );
        outcome
    }

    /// Write every row of the snapshot (search and paging ignored).
    pub fn export(&self, format: ExportFormat, path: &Path, force: bool) -> AppResult<PathBuf> {
        export_access_logs(self.table.rows(), format, path, force)?;

        audit_quiet(
            self.backend.audit,
            "export",
            &path.display().to_string(),
            &format!("{} access logs as {}", self.table.rows().len(), format.as_str()),
        );
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DocumentStore;
    use crate::backend::local::{AuthSettings, LocalBackend};
    use serde_json::json;

    fn seed(local: &LocalBackend, name: &str, checkin: Option<&str>) -> String {
        let mut v = json!({ "name": name, "position": "intern", "date": "2025-03-01" });
        if let Some(c) = checkin {
            v["checkin"] = json!(c);
        }
        let fields = v.as_object().cloned().unwrap();
        local.store.add(ACCESS, fields).unwrap()
    }

    #[test]
    fn rows_are_sorted_newest_checkin_first_with_missing_last() {
        let local = LocalBackend::in_memory(AuthSettings::default()).unwrap();
        seed(&local, "Early", Some("2025-03-01T08:00:00"));
        seed(&local, "Nobody", None);
        seed(&local, "Late", Some("2025-03-01T09:30:00"));

        let page = AccessLogsPage::load(Backend::local(&local)).unwrap();
        let names: Vec<&str> = page.table.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Late", "Early", "Nobody"]);
        assert_eq!(page.table.rows()[0].checkin_time, "09:30:00");
        assert_eq!(page.table.rows()[2].checkin_time, "");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let local = LocalBackend::in_memory(AuthSettings::default()).unwrap();
        local.store.add(ACCESS, serde_json::Map::new()).unwrap();

        let page = AccessLogsPage::load(Backend::local(&local)).unwrap();
        let row = &page.table.rows()[0];
        assert_eq!(row.name, "");
        assert_eq!(row.position, "");
        assert_eq!(row.date, "");
    }

    #[test]
    fn single_delete_removes_row_and_document() {
        let local = LocalBackend::in_memory(AuthSettings::default()).unwrap();
        let id = seed(&local, "Ann", Some("2025-03-01T08:00:00"));

        let mut page = AccessLogsPage::load(Backend::local(&local)).unwrap();
        page.table.toggle_row(&id);
        page.delete(&id).unwrap();

        assert!(page.table.rows().is_empty());
        assert!(page.table.selected().is_empty());
        assert!(local.store.get(ACCESS, &id).unwrap().is_none());
    }
}
