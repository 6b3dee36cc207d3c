// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{AccessLogExport, SHEET_NAME};
use crate::export::xlsx::export_xlsx;
use crate::models::access_log::AccessLogRow;
use crate::ui::messages::warning;
use crate::ui::prompt::confirm;
use std::path::{Path, PathBuf};

/// `AccessLog.<ext>`
pub fn default_file_name(format: ExportFormat) -> String {
    format!("{SHEET_NAME}.{}", format.as_str())
}

/// Output path: the explicit file when given, otherwise the default file
/// name inside `export_dir`.
pub fn resolve_output(file: Option<&str>, export_dir: &str, format: ExportFormat) -> PathBuf {
    match file {
        Some(f) => PathBuf::from(f),
        None => Path::new(export_dir).join(default_file_name(format)),
    }
}

/// A missing file may be created; an existing one only with `force` or
/// once the user agrees to replace it.
fn check_overwrite(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() {
        return Ok(());
    }
    if !force {
        warning(format!("The file '{}' already exists.", path.display()));
    }
    if confirm("Overwrite?", force)? {
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled, existing file not overwritten".to_string(),
        ))
    }
}

/// Write `rows` to `path` in the requested format.
///
/// An existing file is only replaced with `force` or after confirmation.
/// With no rows, CSV and XLSX still hold the header row; JSON is `[]`.
pub fn export_access_logs(
    rows: &[AccessLogRow],
    format: ExportFormat,
    path: &Path,
    force: bool,
) -> AppResult<()> {
    check_overwrite(path, force)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    if rows.is_empty() {
        warning("No access logs to export.");
    }

    let records: Vec<AccessLogExport> = rows.iter().map(AccessLogExport::from).collect();

    match format {
        ExportFormat::Csv => export_csv(&records, path),
        ExportFormat::Json => export_json(&records, path),
        ExportFormat::Xlsx => export_xlsx(&records, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_check_passes_for_new_files_and_forced_ones() {
        let path = std::env::temp_dir().join("podguard_check_overwrite.csv");
        std::fs::remove_file(&path).ok();
        assert!(check_overwrite(&path, false).is_ok());

        std::fs::write(&path, "old").unwrap();
        assert!(check_overwrite(&path, true).is_ok());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn default_names_follow_the_sheet() {
        assert_eq!(default_file_name(ExportFormat::Xlsx), "AccessLog.xlsx");
        assert_eq!(
            resolve_output(None, "/tmp/out", ExportFormat::Csv),
            PathBuf::from("/tmp/out/AccessLog.csv")
        );
        assert_eq!(
            resolve_output(Some("x.json"), "/tmp/out", ExportFormat::Json),
            PathBuf::from("x.json")
        );
    }
}
