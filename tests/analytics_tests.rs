use podguard::core::analytics::{AnalyticsReport, Dashboard, time_to_minutes};
use podguard::models::access_log::{AccessLog, parse_timestamp};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, init_signed_in, pg, seed_access, setup_test_db};

fn log(name: &str, checkin: &str) -> AccessLog {
    let checkin = parse_timestamp(checkin);
    AccessLog {
        id: name.into(),
        name: name.into(),
        position: "intern".into(),
        date: checkin.map(|dt| dt.date()),
        checkin,
        checkout: None,
    }
}

#[test]
fn clock_strings_become_minutes() {
    assert_eq!(time_to_minutes("08:15:00"), Some(495));
    assert_eq!(time_to_minutes("09:00:00"), Some(540));
    assert_eq!(time_to_minutes("23:59"), Some(1439));
    assert_eq!(time_to_minutes("24:00"), None);
    assert_eq!(time_to_minutes("08:60"), None);
}

#[test]
fn dashboard_puts_the_newest_date_first() {
    let d = Dashboard::from_logs(vec![
        log("Ann", "2025-03-01T08:15:00"),
        log("Ben", "2025-03-03T09:00:00"),
        log("Cy", "2025-03-02T10:00:00"),
    ]);

    assert_eq!(d.latest.as_ref().map(|r| r.name.as_str()), Some("Ben"));
    assert_eq!(d.latest_checkin, 540);
    assert_eq!(d.average_checkin, (495 + 540 + 600) / 3);
    assert_eq!(d.series.labels, ["2025-03-03", "2025-03-02", "2025-03-01"]);
}

#[test]
fn analytics_report_of_no_rows_is_zero() {
    let report = AnalyticsReport::from_rows(&[]);
    assert!(report.series.is_empty());
    assert_eq!(report.average_checkin, 0);
    assert_eq!(report.average_checkout, 0);
}

#[test]
fn analytics_requires_a_session() {
    let db_path = setup_test_db("analytics_no_session");
    init_db(&db_path);

    pg().args(["--db", &db_path, "analytics"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));
}

#[test]
fn analytics_prints_averages() {
    let db_path = setup_test_db("analytics_cli");
    init_signed_in(&db_path);
    seed_access(&db_path, "Ann", "intern", "2025-03-01T08:15:00", "2025-03-01T17:00:00");
    seed_access(&db_path, "Ben", "support", "2025-03-02T09:00:00", "2025-03-02T18:00:00");

    pg().args(["--db", &db_path, "analytics"])
        .assert()
        .success()
        .stdout(
            contains("Analytics Overview")
                .and(contains("495 (08:15)"))
                .and(contains("540 (09:00)"))
                .and(contains("Average check-in"))
                .and(contains("517 (08:37)"))
                .and(contains("1050 (17:30)")),
        );
}

#[test]
fn dashboard_shows_latest_entry() {
    let db_path = setup_test_db("dashboard_cli");
    init_signed_in(&db_path);
    seed_access(&db_path, "Ann", "intern", "2025-03-01T08:15:00", "2025-03-01T17:00:00");
    seed_access(&db_path, "Ben", "support", "2025-03-02T09:00:00", "");

    pg().args(["--db", &db_path, "dashboard"])
        .assert()
        .success()
        .stdout(
            contains("Dashboard")
                .and(contains("Ben (support) on 2025-03-02"))
                .and(contains("Latest check-in :"))
                .and(contains("540 (09:00)")),
        );
}

#[test]
fn open_dashboard_route_renders_the_dashboard() {
    let db_path = setup_test_db("dashboard_open");
    init_signed_in(&db_path);

    pg().args(["--db", &db_path, "open", "/podguard/"])
        .assert()
        .success()
        .stdout(contains("Dashboard").and(contains("Latest entry")));
}
