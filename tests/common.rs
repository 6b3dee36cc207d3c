#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use podguard::backend::DocumentStore;
use podguard::backend::local::{AuthSettings, LocalBackend};
use podguard::backend::store::ACCESS;
use serde_json::json;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "secret123";

/// Binary under test, isolated from the real home directory.
pub fn pg() -> Command {
    let mut cmd = cargo_bin_cmd!("podguard");
    cmd.env("HOME", test_home());
    cmd
}

pub fn test_home() -> PathBuf {
    let mut path = env::temp_dir();
    path.push("podguard_test_home");
    fs::create_dir_all(&path).ok();
    path
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_podguard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    pg().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh database with a signed-in administrator.
pub fn init_signed_in(db_path: &str) {
    init_db(db_path);
    pg().args([
        "--db",
        db_path,
        "signup",
        "--name",
        "Admin",
        "--email",
        ADMIN_EMAIL,
        "--password",
        ADMIN_PASSWORD,
    ])
    .assert()
    .success();
}

/// Add an employee through the CLI and return its document id.
pub fn add_user(db_path: &str, name: &str, email: &str) -> String {
    pg().args([
        "--db", db_path, "users", "add", "--name", name, "--email", email, "--position",
        "intern",
    ])
    .assert()
    .success();

    let local = open(db_path);
    local
        .store
        .get_all(podguard::backend::store::EMPLOYEES)
        .unwrap()
        .into_iter()
        .find(|d| d.str_field("email") == Some(email))
        .map(|d| d.id)
        .unwrap()
}

pub fn open(db_path: &str) -> LocalBackend {
    LocalBackend::open(db_path, AuthSettings::default()).unwrap()
}

/// Access logs have no creation path in the console; tests write them
/// straight into the store.
pub fn seed_access(db_path: &str, name: &str, position: &str, checkin: &str, checkout: &str) -> String {
    let local = open(db_path);
    let date = checkin.get(..10).unwrap_or_default();
    let fields = json!({
        "name": name,
        "position": position,
        "date": date,
        "checkin": checkin,
        "checkout": checkout,
    });
    local
        .store
        .add(ACCESS, fields.as_object().cloned().unwrap())
        .unwrap()
}
