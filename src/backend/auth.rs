//! Authentication provider contract.
//!
//! The console never authenticates anybody itself: it calls into an
//! [`AuthProvider`] and trusts its error codes verbatim.

use super::listeners::{AuthListener, Subscription};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier of a sign-in method attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    Password,
    Google,
    Other(String),
}

impl ProviderId {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderId::Password => "password",
            ProviderId::Google => "google.com",
            ProviderId::Other(s) => s,
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s {
            "password" => ProviderId::Password,
            "google.com" => ProviderId::Google,
            other => ProviderId::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity issued by the provider for a signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub email_verified: bool,
    pub providers: Vec<ProviderId>,
}

impl AuthUser {
    pub fn has_provider(&self, id: &ProviderId) -> bool {
        self.providers.iter().any(|p| p == id)
    }
}

/// Identity asserted by a federated provider (e.g. the Google popup).
#[derive(Debug, Clone)]
pub struct FederatedIdentity {
    pub provider: ProviderId,
    pub email: String,
    pub display_name: Option<String>,
}

/// Where the provider keeps the signed-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persistence {
    /// Survives process restarts.
    #[default]
    Local,
    /// Lost when the provider is dropped.
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    InvalidCredential,
    InvalidEmail,
    UserNotFound,
    WrongPassword,
    MissingPassword,
    TooManyRequests,
    NetworkRequestFailed,
    EmailAlreadyInUse,
    WeakPassword,
    InvalidActionCode,
    NoCurrentUser,
    Internal(String),
}

impl AuthErrorCode {
    /// Wire code, e.g. `auth/invalid-email`.
    pub fn code(&self) -> String {
        let tail = match self {
            AuthErrorCode::InvalidCredential => "invalid-credential",
            AuthErrorCode::InvalidEmail => "invalid-email",
            AuthErrorCode::UserNotFound => "user-not-found",
            AuthErrorCode::WrongPassword => "wrong-password",
            AuthErrorCode::MissingPassword => "missing-password",
            AuthErrorCode::TooManyRequests => "too-many-requests",
            AuthErrorCode::NetworkRequestFailed => "network-request-failed",
            AuthErrorCode::EmailAlreadyInUse => "email-already-in-use",
            AuthErrorCode::WeakPassword => "weak-password",
            AuthErrorCode::InvalidActionCode => "invalid-action-code",
            AuthErrorCode::NoCurrentUser => "no-current-user",
            AuthErrorCode::Internal(_) => "internal-error",
        };
        format!("auth/{tail}")
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Authentication error ({})", code.code())]
pub struct AuthError {
    pub code: AuthErrorCode,
}

impl AuthError {
    pub fn new(code: AuthErrorCode) -> Self {
        Self { code }
    }
}

impl From<AuthErrorCode> for AuthError {
    fn from(code: AuthErrorCode) -> Self {
        Self::new(code)
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Client surface of the authentication backend.
pub trait AuthProvider {
    fn set_persistence(&self, persistence: Persistence) -> AuthResult<()>;

    /// Register a listener. The provider calls it once with the current
    /// state right after registration and again on every change.
    fn on_auth_state_changed(&self, listener: AuthListener) -> AuthResult<Subscription>;

    fn current_user(&self) -> Option<AuthUser>;

    fn create_user_with_email_and_password(&self, email: &str, password: &str)
    -> AuthResult<AuthUser>;

    fn sign_in_with_email_and_password(&self, email: &str, password: &str) -> AuthResult<AuthUser>;

    fn sign_in_with_federated(&self, identity: &FederatedIdentity) -> AuthResult<AuthUser>;

    fn sign_out(&self) -> AuthResult<()>;

    fn send_password_reset_email(&self, email: &str) -> AuthResult<()>;

    fn confirm_password_reset(&self, code: &str, new_password: &str) -> AuthResult<()>;

    fn update_password(&self, new_password: &str) -> AuthResult<()>;

    fn send_email_verification(&self) -> AuthResult<()>;

    fn apply_verification_code(&self, code: &str) -> AuthResult<()>;

    fn delete_current_user(&self) -> AuthResult<()>;
}
