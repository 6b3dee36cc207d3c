//! Sign-in, sign-up and account flows.
//!
//! Every failure a user can cause comes back as [`AppError::Rejected`] with
//! the page's fixed message; the raw code is only logged.

use super::Backend;
use super::auth_messages::{
    NO_CURRENT_USER, RESET_EMAIL_FAILED, RESET_EMAIL_REQUIRED, RESET_EMAIL_SENT, account_message,
    sign_in_message, sign_up_message,
};
use crate::backend::auth::{AuthError, AuthErrorCode, AuthUser, FederatedIdentity};
use crate::backend::store::{USERS, to_fields};
use crate::db::log::audit_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::profile::UserProfile;
use crate::routes::Route;
use crate::ui::messages::{error, warning};
use chrono::Local;

fn reject(e: &AuthError, lookup: fn(&AuthErrorCode) -> &'static str) -> AppError {
    error(format!("Authentication failed: {}", e.code.code()));
    AppError::Rejected(lookup(&e.code).to_string())
}

fn write_profile(b: &Backend, uid: &str, profile: &UserProfile) {
    let result = to_fields(profile).and_then(|fields| b.store.set(USERS, uid, fields));
    if let Err(e) = result {
        error(format!("Error adding user to the users collection: {e}"));
    }
}

/// Opening the sign-in page drops any current session first.
pub fn visit_sign_in(b: &Backend) {
    if let Err(e) = b.auth.sign_out() {
        error(format!("Error signing out: {e}"));
    }
}

pub fn sign_in(b: &Backend, email: &str, password: &str) -> AppResult<(AuthUser, Route)> {
    let user = b
        .auth
        .sign_in_with_email_and_password(email, password)
        .map_err(|e| reject(&e, sign_in_message))?;

    audit_quiet(b.audit, "signin", email, "Signed in with email/password");
    Ok((user, Route::Dashboard))
}

/// Federated sign-in; the extra profile fields are stored on the account's
/// `users` document.
pub fn sign_in_with_federated(
    b: &Backend,
    identity: &FederatedIdentity,
    mut profile: UserProfile,
) -> AppResult<(AuthUser, Route)> {
    let user = b
        .auth
        .sign_in_with_federated(identity)
        .map_err(|e| reject(&e, sign_in_message))?;

    profile.email = user.email.clone();
    profile.created_at = Local::now().to_rfc3339();
    write_profile(b, &user.uid, &profile);

    audit_quiet(
        b.audit,
        "signin",
        &identity.email,
        &format!("Signed in with {}", identity.provider),
    );
    Ok((user, Route::Dashboard))
}

pub fn forgot_password(b: &Backend, email: &str) -> AppResult<&'static str> {
    if email.trim().is_empty() {
        return Err(AppError::Rejected(RESET_EMAIL_REQUIRED.to_string()));
    }

    b.auth.send_password_reset_email(email).map_err(|e| {
        error(format!("Password reset failed: {}", e.code.code()));
        AppError::Rejected(RESET_EMAIL_FAILED.to_string())
    })?;

    audit_quiet(b.audit, "reset", email, "Password reset email sent");
    Ok(RESET_EMAIL_SENT)
}

pub fn confirm_password_reset(b: &Backend, code: &str, new_password: &str) -> AppResult<()> {
    b.auth
        .confirm_password_reset(code, new_password)
        .map_err(|e| reject(&e, account_message))?;
    audit_quiet(b.audit, "reset", "", "Password reset confirmed");
    Ok(())
}

/// Create the account, store its profile, then send the verification mail.
/// Only account creation can fail the flow.
pub fn sign_up(b: &Backend, name: &str, email: &str, password: &str) -> AppResult<(AuthUser, Route)> {
    let user = b
        .auth
        .create_user_with_email_and_password(email, password)
        .map_err(|e| reject(&e, sign_up_message))?;

    let profile = UserProfile {
        email: user.email.clone(),
        name: Some(name.to_string()),
        created_at: Local::now().to_rfc3339(),
        ..Default::default()
    };
    write_profile(b, &user.uid, &profile);

    if let Err(e) = b.auth.send_email_verification() {
        warning(format!("Verification email not sent: {}", e.code.code()));
    }

    audit_quiet(b.audit, "signup", email, &format!("Account created for {name}"));
    Ok((user, Route::Dashboard))
}

pub fn sign_out(b: &Backend) -> AppResult<Route> {
    let who = b.auth.current_user().and_then(|u| u.email).unwrap_or_default();
    b.auth.sign_out().map_err(|e| reject(&e, account_message))?;
    audit_quiet(b.audit, "signout", &who, "Signed out");
    Ok(Route::SignIn)
}

pub fn change_password(b: &Backend, new_password: &str) -> AppResult<()> {
    b.auth
        .update_password(new_password)
        .map_err(|e| reject(&e, account_message))?;
    let who = b.auth.current_user().and_then(|u| u.email).unwrap_or_default();
    audit_quiet(b.audit, "password", &who, "Password changed");
    Ok(())
}

pub fn send_verification(b: &Backend) -> AppResult<()> {
    b.auth
        .send_email_verification()
        .map_err(|e| reject(&e, account_message))
}

pub fn verify_email(b: &Backend, code: &str) -> AppResult<()> {
    b.auth
        .apply_verification_code(code)
        .map_err(|e| reject(&e, account_message))
}

/// Delete the signed-in account. The `users` profile document goes with it.
pub fn delete_account(b: &Backend) -> AppResult<Route> {
    let user = b
        .auth
        .current_user()
        .ok_or_else(|| AppError::Rejected(NO_CURRENT_USER.to_string()))?;

    b.auth
        .delete_current_user()
        .map_err(|e| reject(&e, account_message))?;

    if let Err(e) = b.store.delete(USERS, &user.uid) {
        error(format!("Error deleting user profile: {e}"));
    }

    audit_quiet(
        b.audit,
        "delete_account",
        user.email.as_deref().unwrap_or_default(),
        "Account deleted",
    );
    Ok(Route::SignIn)
}
