use podguard::backend::auth::{AuthErrorCode, AuthProvider, FederatedIdentity, ProviderId};
use podguard::backend::local::{AuthSettings, LocalBackend};
use podguard::backend::store::USERS;
use podguard::backend::DocumentStore;
use podguard::core::Backend;
use podguard::core::auth::{self as flows};
use podguard::core::auth_messages::{DEFAULT_MESSAGE, sign_in_message, sign_up_message};
use podguard::errors::AppError;
use podguard::models::profile::UserProfile;
use podguard::routes::Route;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ADMIN_EMAIL, ADMIN_PASSWORD, init_db, init_signed_in, pg, setup_test_db};

fn backend() -> LocalBackend {
    LocalBackend::in_memory(AuthSettings::default()).unwrap()
}

fn code_of<T: std::fmt::Debug>(r: Result<T, podguard::backend::auth::AuthError>) -> AuthErrorCode {
    r.unwrap_err().code
}

fn rejected<T: std::fmt::Debug>(r: Result<T, AppError>) -> String {
    match r.unwrap_err() {
        AppError::Rejected(msg) => msg,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

// ---------------------------
// Message tables
// ---------------------------

#[test]
fn sign_in_messages() {
    assert_eq!(sign_in_message(&AuthErrorCode::InvalidCredential), "Wrong email or password.");
    assert_eq!(sign_in_message(&AuthErrorCode::WrongPassword), "Wrong email or password.");
    assert_eq!(sign_in_message(&AuthErrorCode::InvalidEmail), "The email you entered is invalid.");
    assert_eq!(sign_in_message(&AuthErrorCode::UserNotFound), "This email is not registered.");
    assert_eq!(sign_in_message(&AuthErrorCode::MissingPassword), "Please enter the password.");
    assert_eq!(
        sign_in_message(&AuthErrorCode::TooManyRequests),
        "Too many login attempts. Please try again later."
    );
    assert_eq!(
        sign_in_message(&AuthErrorCode::NetworkRequestFailed),
        "A network error occurred. Please check your connection."
    );
    assert_eq!(sign_in_message(&AuthErrorCode::EmailAlreadyInUse), DEFAULT_MESSAGE);
}

#[test]
fn sign_up_messages() {
    assert_eq!(sign_up_message(&AuthErrorCode::EmailAlreadyInUse), "This email is already in use.");
    assert_eq!(sign_up_message(&AuthErrorCode::InvalidEmail), "The email you entered is invalid.");
    assert_eq!(sign_up_message(&AuthErrorCode::WeakPassword), "The password is too weak.");
    assert_eq!(sign_up_message(&AuthErrorCode::UserNotFound), DEFAULT_MESSAGE);
}

#[test]
fn wire_codes() {
    assert_eq!(AuthErrorCode::InvalidCredential.code(), "auth/invalid-credential");
    assert_eq!(AuthErrorCode::TooManyRequests.code(), "auth/too-many-requests");
    assert_eq!(AuthErrorCode::EmailAlreadyInUse.code(), "auth/email-already-in-use");
}

// ---------------------------
// Local provider
// ---------------------------

#[test]
fn local_provider_error_codes() {
    let local = backend();
    let auth = &local.auth;

    assert_eq!(
        code_of(auth.create_user_with_email_and_password("nope", "secret123")),
        AuthErrorCode::InvalidEmail
    );
    assert_eq!(
        code_of(auth.create_user_with_email_and_password("a@example.com", "123")),
        AuthErrorCode::WeakPassword
    );
    auth.create_user_with_email_and_password("a@example.com", "secret123")
        .unwrap();
    assert_eq!(
        code_of(auth.create_user_with_email_and_password("A@example.com", "secret123")),
        AuthErrorCode::EmailAlreadyInUse
    );

    assert_eq!(
        code_of(auth.sign_in_with_email_and_password("b@example.com", "secret123")),
        AuthErrorCode::UserNotFound
    );
    assert_eq!(
        code_of(auth.sign_in_with_email_and_password("a@example.com", "")),
        AuthErrorCode::MissingPassword
    );
    assert_eq!(
        code_of(auth.sign_in_with_email_and_password("a@example.com", "wrong-one")),
        AuthErrorCode::WrongPassword
    );
    let user = auth
        .sign_in_with_email_and_password("a@example.com", "secret123")
        .unwrap();
    assert!(user.has_provider(&ProviderId::Password));
    assert!(!user.email_verified);
}

#[test]
fn repeated_failures_lock_the_account_until_reset() {
    let local = LocalBackend::in_memory(AuthSettings {
        min_password_length: 6,
        max_failed_sign_ins: 3,
    })
    .unwrap();
    let auth = &local.auth;
    auth.create_user_with_email_and_password("a@example.com", "secret123")
        .unwrap();

    for _ in 0..3 {
        assert_eq!(
            code_of(auth.sign_in_with_email_and_password("a@example.com", "bad-pass")),
            AuthErrorCode::WrongPassword
        );
    }
    // even the right password is refused now
    assert_eq!(
        code_of(auth.sign_in_with_email_and_password("a@example.com", "secret123")),
        AuthErrorCode::TooManyRequests
    );

    auth.send_password_reset_email("a@example.com").unwrap();
    let mail = local.mailer.outbox().unwrap().pop().unwrap();
    let code = mail.body.rsplit(' ').next().unwrap().to_string();

    auth.confirm_password_reset(&code, "brand-new-pass").unwrap();
    assert_eq!(
        code_of(auth.confirm_password_reset(&code, "another-pass")),
        AuthErrorCode::InvalidActionCode
    );
    auth.sign_in_with_email_and_password("a@example.com", "brand-new-pass")
        .unwrap();
}

#[test]
fn verification_code_marks_the_address_verified() {
    let local = backend();
    let b = Backend::local(&local);

    flows::sign_up(&b, "Ann", "ann@example.com", "secret123").unwrap();
    let mail = local.mailer.outbox().unwrap().pop().unwrap();
    assert_eq!(mail.recipient, "ann@example.com");
    let code = mail.body.rsplit(' ').next().unwrap().to_string();

    flows::verify_email(&b, &code).unwrap();
    assert!(local.auth.current_user().unwrap().email_verified);
}

// ---------------------------
// Flows
// ---------------------------

#[test]
fn sign_up_writes_profile_then_queues_verification_and_lands_on_dashboard() {
    let local = backend();
    let b = Backend::local(&local);

    let (user, route) = flows::sign_up(&b, "Ann", "ann@example.com", "secret123").unwrap();
    assert_eq!(route, Route::Dashboard);

    let doc = local.store.get(USERS, &user.uid).unwrap().unwrap();
    assert_eq!(doc.str_field("email"), Some("ann@example.com"));
    assert_eq!(doc.str_field("name"), Some("Ann"));
    assert!(doc.str_field("createdAt").is_some());

    let outbox = local.mailer.outbox().unwrap();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].subject, "Verify your email");
}

#[test]
fn sign_up_failures_use_the_sign_up_table() {
    let local = backend();
    let b = Backend::local(&local);

    flows::sign_up(&b, "Ann", "ann@example.com", "secret123").unwrap();
    assert_eq!(
        rejected(flows::sign_up(&b, "Ann", "ann@example.com", "secret123")),
        "This email is already in use."
    );
    assert_eq!(
        rejected(flows::sign_up(&b, "Bo", "bo@example.com", "x")),
        "The password is too weak."
    );
}

#[test]
fn sign_in_failures_use_the_sign_in_table() {
    let local = backend();
    let b = Backend::local(&local);

    assert_eq!(
        rejected(flows::sign_in(&b, "ghost@example.com", "secret123")),
        "This email is not registered."
    );
    assert_eq!(
        rejected(flows::sign_in(&b, "ghost", "secret123")),
        "The email you entered is invalid."
    );
}

#[test]
fn forgot_password_messages() {
    let local = backend();
    let b = Backend::local(&local);
    local
        .auth
        .create_user_with_email_and_password("ann@example.com", "secret123")
        .unwrap();

    assert_eq!(
        rejected(flows::forgot_password(&b, "  ")),
        "Please enter your email to reset your password."
    );
    assert_eq!(
        flows::forgot_password(&b, "ann@example.com").unwrap(),
        "Password reset email sent. Check your inbox."
    );
    assert_eq!(
        rejected(flows::forgot_password(&b, "ghost@example.com")),
        "Failed to send password reset email. Please try again."
    );
}

#[test]
fn federated_sign_in_stores_extended_profile() {
    let local = backend();
    let b = Backend::local(&local);

    let identity = FederatedIdentity {
        provider: ProviderId::Google,
        email: "g@example.com".into(),
        display_name: Some("Gina".into()),
    };
    let profile = UserProfile {
        first_name: Some("Gina".into()),
        country: Some("IT".into()),
        ..Default::default()
    };

    let (user, route) = flows::sign_in_with_federated(&b, &identity, profile).unwrap();
    assert_eq!(route, Route::Dashboard);
    assert!(user.email_verified);
    assert_eq!(user.providers, vec![ProviderId::Google]);

    let doc = local.store.get(USERS, &user.uid).unwrap().unwrap();
    assert_eq!(doc.str_field("firstName"), Some("Gina"));
    assert_eq!(doc.str_field("country"), Some("IT"));
    assert_eq!(doc.str_field("email"), Some("g@example.com"));
}

#[test]
fn account_operations_need_a_signed_in_user() {
    let local = backend();
    let b = Backend::local(&local);

    assert_eq!(
        rejected(flows::change_password(&b, "secret123")),
        "No authenticated user found."
    );
    assert_eq!(
        rejected(flows::delete_account(&b)),
        "No authenticated user found."
    );
}

#[test]
fn delete_account_removes_profile_and_session() {
    let local = backend();
    let b = Backend::local(&local);
    let (user, _) = flows::sign_up(&b, "Ann", "ann@example.com", "secret123").unwrap();

    assert_eq!(flows::delete_account(&b).unwrap(), Route::SignIn);
    assert!(local.auth.current_user().is_none());
    assert!(local.store.get(USERS, &user.uid).unwrap().is_none());
    assert_eq!(
        rejected(flows::sign_in(&b, "ann@example.com", "secret123")),
        "This email is not registered."
    );
}

// ---------------------------
// CLI
// ---------------------------

#[test]
fn cli_signup_persists_the_session() {
    let db_path = setup_test_db("cli_signup");
    init_signed_in(&db_path);

    pg().args(["--db", &db_path, "whoami"])
        .assert()
        .success()
        .stdout(contains(ADMIN_EMAIL).and(contains("email/password")));
}

#[test]
fn cli_signin_wrong_password_shows_message() {
    let db_path = setup_test_db("cli_signin_wrong");
    init_signed_in(&db_path);

    pg().args([
        "--db",
        &db_path,
        "signin",
        "--email",
        ADMIN_EMAIL,
        "--password",
        "not-the-password",
    ])
    .assert()
    .failure()
    .stderr(contains("Wrong email or password."));

    // visiting sign-in signed the admin out
    pg().args(["--db", &db_path, "whoami"])
        .assert()
        .success()
        .stdout(contains("Not signed in."));
}

#[test]
fn cli_signout_then_signin() {
    let db_path = setup_test_db("cli_signout_signin");
    init_signed_in(&db_path);

    pg().args(["--db", &db_path, "signout"])
        .assert()
        .success()
        .stdout(contains("Signed out."));

    pg().args([
        "--db",
        &db_path,
        "signin",
        "--email",
        ADMIN_EMAIL,
        "--password",
        ADMIN_PASSWORD,
    ])
    .assert()
    .success()
    .stdout(contains(format!("Signed in as {ADMIN_EMAIL}")));
}

#[test]
fn cli_google_signin_is_a_federated_user() {
    let db_path = setup_test_db("cli_google");
    init_db(&db_path);

    pg().args([
        "--db",
        &db_path,
        "signin",
        "--google",
        "--email",
        "g@example.com",
        "--name",
        "Gina",
    ])
    .assert()
    .success();

    pg().args(["--db", &db_path, "whoami"])
        .assert()
        .success()
        .stdout(contains("federated (google.com)"));
}

#[test]
fn cli_mail_print_shows_verification() {
    let db_path = setup_test_db("cli_mail");
    init_signed_in(&db_path);

    pg().args(["--db", &db_path, "mail", "--print"])
        .assert()
        .success()
        .stdout(contains("Verify your email").and(contains(ADMIN_EMAIL)));
}

#[test]
fn cli_audit_log_records_signup() {
    let db_path = setup_test_db("cli_audit");
    init_signed_in(&db_path);

    pg().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("signup").and(contains("migration_applied")));
}
