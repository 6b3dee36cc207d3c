use podguard::routes::{BASENAME, Route};
use predicates::str::contains;

mod common;
use common::{pg, setup_test_db};

#[test]
fn resolves_with_and_without_basename() {
    assert_eq!(Route::resolve("/", BASENAME), Route::Dashboard);
    assert_eq!(Route::resolve("/podguard", BASENAME), Route::Dashboard);
    assert_eq!(Route::resolve("/podguard/", BASENAME), Route::Dashboard);
    assert_eq!(Route::resolve("/podguard/users", BASENAME), Route::Users);
    assert_eq!(Route::resolve("/users/", BASENAME), Route::Users);
    assert_eq!(Route::resolve("/access-logs", BASENAME), Route::AccessLogs);
    assert_eq!(Route::resolve("/podguard/analytics", BASENAME), Route::Analytics);
    assert_eq!(
        Route::resolve("/podguard/authentication/sign-in", BASENAME),
        Route::SignIn
    );
    assert_eq!(
        Route::resolve("/authentication/sign-up", BASENAME),
        Route::SignUp
    );
}

#[test]
fn unknown_paths_are_not_found() {
    assert_eq!(
        Route::resolve("/nope", BASENAME),
        Route::NotFound("/nope".into())
    );
    // the basename must be a whole segment
    assert!(matches!(
        Route::resolve("/podguardx/users", BASENAME),
        Route::NotFound(_)
    ));
}

#[test]
fn only_console_pages_are_protected() {
    assert!(Route::Dashboard.is_protected());
    assert!(Route::Users.is_protected());
    assert!(Route::AccessLogs.is_protected());
    assert!(Route::Analytics.is_protected());
    assert!(!Route::SignIn.is_protected());
    assert!(!Route::SignUp.is_protected());
    assert!(!Route::NotFound("/x".into()).is_protected());
}

#[test]
fn open_unknown_path_fails() {
    let db_path = setup_test_db("open_unknown");
    pg().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pg().args(["--db", &db_path, "open", "/podguard/nowhere"])
        .assert()
        .failure()
        .stderr(contains("Page not found: /podguard/nowhere"));
}

#[test]
fn open_protected_path_without_session_redirects() {
    let db_path = setup_test_db("open_protected");
    pg().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pg().args(["--db", &db_path, "open", "/podguard/users"])
        .assert()
        .failure()
        .stderr(contains(
            "Not signed in: open /podguard/authentication/sign-in first",
        ));
}

#[test]
fn open_sign_up_is_public() {
    let db_path = setup_test_db("open_signup");
    pg().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    pg().args(["--db", &db_path, "open", "/authentication/sign-up"])
        .assert()
        .success()
        .stdout(contains("Sign up"));
}
