use podguard::backend::DocumentStore;
use podguard::backend::store::ACCESS;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, init_signed_in, open, pg, seed_access, setup_test_db, temp_out};

fn seed_three(db_path: &str) -> (String, String, String) {
    let early = seed_access(db_path, "Early Bird", "intern", "2025-03-01T08:00:00", "2025-03-01T16:00:00");
    let late = seed_access(db_path, "Late Riser", "manager", "2025-03-02T09:30:00", "2025-03-02T18:00:00");
    let mid = seed_access(db_path, "Mid Day", "support", "2025-03-01T12:00:00", "");
    (early, late, mid)
}

#[test]
fn logs_require_a_session() {
    let db_path = setup_test_db("logs_no_session");
    init_db(&db_path);

    pg().args(["--db", &db_path, "logs", "list"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));
}

#[test]
fn list_is_newest_check_in_first() {
    let db_path = setup_test_db("logs_list_order");
    init_signed_in(&db_path);
    seed_three(&db_path);

    let output = pg()
        .args(["--db", &db_path, "logs", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let late = stdout.find("Late Riser").unwrap();
    let mid = stdout.find("Mid Day").unwrap();
    let early = stdout.find("Early Bird").unwrap();
    assert!(late < mid && mid < early, "unexpected order:\n{stdout}");
    assert!(stdout.contains("09:30:00"));
}

#[test]
fn search_matches_name_or_position() {
    let db_path = setup_test_db("logs_search");
    init_signed_in(&db_path);
    seed_three(&db_path);

    pg().args(["--db", &db_path, "logs", "list", "--search", "MANAGER"])
        .assert()
        .success()
        .stdout(contains("Late Riser").and(contains("Early Bird").not()));

    pg().args(["--db", &db_path, "logs", "list", "--search", "bird"])
        .assert()
        .success()
        .stdout(contains("Early Bird").and(contains("Mid Day").not()));
}

#[test]
fn empty_collection_lists_nothing() {
    let db_path = setup_test_db("logs_empty");
    init_signed_in(&db_path);

    pg().args(["--db", &db_path, "logs", "list"])
        .assert()
        .success()
        .stdout(contains("No access logs found."));
}

#[test]
fn single_delete_needs_no_confirmation() {
    let db_path = setup_test_db("logs_delete_single");
    init_signed_in(&db_path);
    let (early, _, _) = seed_three(&db_path);

    pg().args(["--db", &db_path, "logs", "delete", &early])
        .assert()
        .success()
        .stdout(contains("Deleted access log of Early Bird."));

    let left = open(&db_path).store.get_all(ACCESS).unwrap();
    assert_eq!(left.len(), 2);
    assert!(left.iter().all(|d| d.id != early));
}

#[test]
fn bulk_delete_of_unknown_id_fails() {
    let db_path = setup_test_db("logs_delete_unknown");
    init_signed_in(&db_path);
    let (early, _, _) = seed_three(&db_path);

    pg().args(["--db", &db_path, "logs", "delete", &early, "nope", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No access log with id nope"));

    assert_eq!(open(&db_path).store.get_all(ACCESS).unwrap().len(), 3);
}

#[test]
fn repeated_ids_delete_the_log_once() {
    let db_path = setup_test_db("logs_delete_repeated");
    init_signed_in(&db_path);
    let (early, _, _) = seed_three(&db_path);

    pg().args(["--db", &db_path, "logs", "delete", &early, &early, "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted 1 access logs.").and(contains("No access logs selected.").not()));

    let left = open(&db_path).store.get_all(ACCESS).unwrap();
    assert_eq!(left.len(), 2);
    assert!(left.iter().all(|d| d.id != early));
}

#[test]
fn bulk_delete_all() {
    let db_path = setup_test_db("logs_delete_all");
    init_signed_in(&db_path);
    seed_three(&db_path);

    pg().args(["--db", &db_path, "logs", "delete", "--all", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted 3 access logs."));

    assert!(open(&db_path).store.get_all(ACCESS).unwrap().is_empty());
}

#[test]
fn export_csv_has_headers_and_every_row() {
    let db_path = setup_test_db("logs_export_csv");
    init_signed_in(&db_path);
    seed_three(&db_path);
    let out = temp_out("logs_export_csv", "csv");

    pg().args([
        "--db", &db_path, "logs", "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Name,Position,Date,Check-In Time,Check-Out Time")
    );
    assert_eq!(
        lines.next(),
        Some("Late Riser,manager,2025-03-02,09:30:00,18:00:00")
    );
    assert_eq!(lines.count(), 2);
}

#[test]
fn export_json_uses_column_names() {
    let db_path = setup_test_db("logs_export_json");
    init_signed_in(&db_path);
    seed_three(&db_path);
    let out = temp_out("logs_export_json", "json");

    pg().args([
        "--db", &db_path, "logs", "export", "--format", "json", "--file", &out,
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["Name"], "Late Riser");
    assert_eq!(rows[0]["Check-In Time"], "09:30:00");
    assert_eq!(rows[1]["Check-Out Time"], "");
}

#[test]
fn export_xlsx_is_the_default_format() {
    let db_path = setup_test_db("logs_export_xlsx");
    init_signed_in(&db_path);
    seed_three(&db_path);
    let out = temp_out("logs_export_xlsx", "xlsx");

    pg().args(["--db", &db_path, "logs", "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let bytes = fs::read(&out).unwrap();
    // xlsx is a zip container
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn export_of_empty_table_still_writes_headers() {
    let db_path = setup_test_db("logs_export_empty");
    init_signed_in(&db_path);
    let out = temp_out("logs_export_empty", "csv");

    pg().args([
        "--db", &db_path, "logs", "export", "--format", "csv", "--file", &out,
    ])
    .assert()
    .success()
    .stdout(contains("No access logs to export."));

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.trim(), "Name,Position,Date,Check-In Time,Check-Out Time");
}

#[test]
fn export_of_empty_table_as_json_is_an_empty_array() {
    let db_path = setup_test_db("logs_export_empty_json");
    init_signed_in(&db_path);
    let out = temp_out("logs_export_empty_json", "json");

    pg().args([
        "--db", &db_path, "logs", "export", "--format", "json", "--file", &out,
    ])
    .assert()
    .success();

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
}

#[test]
fn export_overwrites_after_a_yes() {
    let db_path = setup_test_db("logs_export_yes");
    init_signed_in(&db_path);
    seed_three(&db_path);
    let out = temp_out("logs_export_yes", "csv");
    fs::write(&out, "old").unwrap();

    pg().args([
        "--db", &db_path, "logs", "export", "--format", "csv", "--file", &out,
    ])
    .write_stdin("yes\n")
    .assert()
    .success()
    .stdout(contains("already exists").and(contains("Overwrite? [y/N]")));

    assert!(fs::read_to_string(&out).unwrap().starts_with("Name,"));
}

#[test]
fn export_does_not_overwrite_without_force() {
    let db_path = setup_test_db("logs_export_force");
    init_signed_in(&db_path);
    seed_three(&db_path);
    let out = temp_out("logs_export_force", "csv");
    fs::write(&out, "keep me").unwrap();

    pg().args([
        "--db", &db_path, "logs", "export", "--format", "csv", "--file", &out,
    ])
    .write_stdin("n\n")
    .assert()
    .failure()
    .stderr(contains("existing file not overwritten"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    pg().args([
        "--db", &db_path, "logs", "export", "--format", "csv", "--file", &out, "--force",
    ])
    .assert()
    .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("Name,"));
}
