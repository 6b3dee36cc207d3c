//! SQLite-backed authentication provider.
//!
//! Accounts live in `accounts` / `account_providers`; the signed-in account
//! is mirrored into `auth_session` when persistence is [`Persistence::Local`],
//! so a later process resumes the same session.

use super::mail::LocalMailer;
use crate::backend::Mailer;
use crate::backend::auth::{
    AuthError, AuthErrorCode, AuthProvider, AuthResult, AuthUser, FederatedIdentity, Persistence,
    ProviderId,
};
use crate::backend::listeners::{AuthListener, ListenerRegistry, Subscription};
use crate::utils::ids::random_id;
use crate::utils::validation::is_valid_email;
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::rc::Rc;

const UID_LEN: usize = 28;
const ACTION_CODE_LEN: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct AuthSettings {
    pub min_password_length: usize,
    pub max_failed_sign_ins: u32,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            min_password_length: 6,
            max_failed_sign_ins: 5,
        }
    }
}

struct AccountRow {
    uid: String,
    password_hash: Option<String>,
    failed_attempts: u32,
}

fn internal<E: Display>(e: E) -> AuthError {
    AuthError::new(AuthErrorCode::Internal(e.to_string()))
}

fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(internal)
}

fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(internal)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub struct LocalAuth {
    conn: Rc<Connection>,
    mailer: LocalMailer,
    settings: AuthSettings,
    persistence: Cell<Persistence>,
    current: RefCell<Option<AuthUser>>,
    listeners: ListenerRegistry,
}

impl LocalAuth {
    /// Build the provider and resume a persisted session, if any.
    pub fn new(conn: Rc<Connection>, mailer: LocalMailer, settings: AuthSettings) -> AuthResult<Self> {
        let auth = Self {
            conn,
            mailer,
            settings,
            persistence: Cell::new(Persistence::Local),
            current: RefCell::new(None),
            listeners: ListenerRegistry::new(),
        };

        let persisted: Option<String> = auth
            .conn
            .query_row("SELECT uid FROM auth_session WHERE id = 1", [], |row| row.get(0))
            .optional()
            .map_err(internal)?;

        if let Some(uid) = persisted {
            *auth.current.borrow_mut() = auth.load_user(&uid)?;
        }

        Ok(auth)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn load_user(&self, uid: &str) -> AuthResult<Option<AuthUser>> {
        let row = self
            .conn
            .query_row(
                "SELECT uid, email, display_name, email_verified FROM accounts WHERE uid = ?1",
                [uid],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, i64>(3)? == 1,
                    ))
                },
            )
            .optional()
            .map_err(internal)?;

        let Some((uid, email, display_name, email_verified)) = row else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare_cached("SELECT provider FROM account_providers WHERE uid = ?1 ORDER BY provider")
            .map_err(internal)?;
        let providers = stmt
            .query_map([&uid], |row| row.get::<_, String>(0))
            .map_err(internal)?
            .map(|r| r.map(|s| ProviderId::from_db_str(&s)))
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(internal)?;

        Ok(Some(AuthUser {
            uid,
            email: Some(email),
            display_name,
            email_verified,
            providers,
        }))
    }

    fn find_account(&self, email: &str) -> AuthResult<Option<AccountRow>> {
        self.conn
            .query_row(
                "SELECT uid, password_hash, failed_attempts FROM accounts WHERE email = ?1",
                [email],
                |row| {
                    Ok(AccountRow {
                        uid: row.get(0)?,
                        password_hash: row.get(1)?,
                        failed_attempts: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(internal)
    }

    fn add_provider(&self, uid: &str, provider: &ProviderId) -> AuthResult<()> {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO account_providers (uid, provider) VALUES (?1, ?2)",
                params![uid, provider.as_str()],
            )
            .map_err(internal)?;
        Ok(())
    }

    fn insert_account(
        &self,
        email: &str,
        display_name: Option<&str>,
        password_hash: Option<&str>,
        email_verified: bool,
    ) -> AuthResult<String> {
        let uid = random_id(UID_LEN);
        self.conn
            .execute(
                "INSERT INTO accounts (uid, email, display_name, password_hash, email_verified, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    uid,
                    email,
                    display_name,
                    password_hash,
                    email_verified as i64,
                    Local::now().to_rfc3339()
                ],
            )
            .map_err(internal)?;
        Ok(uid)
    }

    fn check_new_password(&self, password: &str) -> AuthResult<()> {
        if password.is_empty() {
            return Err(AuthErrorCode::MissingPassword.into());
        }
        if password.chars().count() < self.settings.min_password_length {
            return Err(AuthErrorCode::WeakPassword.into());
        }
        Ok(())
    }

    fn require_current(&self) -> AuthResult<AuthUser> {
        self.current
            .borrow()
            .clone()
            .ok_or_else(|| AuthErrorCode::NoCurrentUser.into())
    }

    fn persist_session(&self, user: Option<&AuthUser>) -> AuthResult<()> {
        match (self.persistence.get(), user) {
            (Persistence::Local, Some(u)) => {
                self.conn
                    .execute(
                        "INSERT INTO auth_session (id, uid, signed_in_at) VALUES (1, ?1, ?2)
                         ON CONFLICT(id) DO UPDATE SET uid = excluded.uid, signed_in_at = excluded.signed_in_at",
                        params![u.uid, Local::now().to_rfc3339()],
                    )
                    .map_err(internal)?;
            }
            _ => {
                self.conn
                    .execute("DELETE FROM auth_session", [])
                    .map_err(internal)?;
            }
        }
        Ok(())
    }

    /// Single place where the current user changes: persist, then notify.
    fn set_current(&self, user: Option<AuthUser>) -> AuthResult<()> {
        self.persist_session(user.as_ref())?;
        *self.current.borrow_mut() = user.clone();
        self.listeners.notify_all(user.as_ref());
        Ok(())
    }

    fn issue_action_code(&self, uid: &str, kind: &str) -> AuthResult<String> {
        let code = random_id(ACTION_CODE_LEN);
        self.conn
            .execute(
                "INSERT INTO action_codes (code, uid, kind, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![code, uid, kind, Local::now().to_rfc3339()],
            )
            .map_err(internal)?;
        Ok(code)
    }

    /// Consume an action code of the given kind, returning its account uid.
    fn take_action_code(&self, code: &str, kind: &str) -> AuthResult<String> {
        let uid: Option<String> = self
            .conn
            .query_row(
                "SELECT uid FROM action_codes WHERE code = ?1 AND kind = ?2",
                params![code, kind],
                |row| row.get(0),
            )
            .optional()
            .map_err(internal)?;

        let uid = uid.ok_or_else(|| AuthError::new(AuthErrorCode::InvalidActionCode))?;
        self.conn
            .execute("DELETE FROM action_codes WHERE code = ?1", [code])
            .map_err(internal)?;
        Ok(uid)
    }
}

impl AuthProvider for LocalAuth {
    fn set_persistence(&self, persistence: Persistence) -> AuthResult<()> {
        self.persistence.set(persistence);
        let current = self.current.borrow().clone();
        self.persist_session(current.as_ref())
    }

    fn on_auth_state_changed(&self, listener: AuthListener) -> AuthResult<Subscription> {
        let (id, sub) = self.listeners.register(listener);
        let current = self.current.borrow().clone();
        self.listeners.notify_one(id, current.as_ref());
        Ok(sub)
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.current.borrow().clone()
    }

    fn create_user_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> AuthResult<AuthUser> {
        if !is_valid_email(email) {
            return Err(AuthErrorCode::InvalidEmail.into());
        }
        self.check_new_password(password)?;
        if self.find_account(email)?.is_some() {
            return Err(AuthErrorCode::EmailAlreadyInUse.into());
        }

        let hash = hash_password(password)?;
        let uid = self.insert_account(email, None, Some(&hash), false)?;
        self.add_provider(&uid, &ProviderId::Password)?;

        let user = self
            .load_user(&uid)?
            .ok_or_else(|| AuthError::new(AuthErrorCode::UserNotFound))?;
        self.set_current(Some(user.clone()))?;
        Ok(user)
    }

    fn sign_in_with_email_and_password(&self, email: &str, password: &str) -> AuthResult<AuthUser> {
        if !is_valid_email(email) {
            return Err(AuthErrorCode::InvalidEmail.into());
        }
        if password.is_empty() {
            return Err(AuthErrorCode::MissingPassword.into());
        }

        let account = self
            .find_account(email)?
            .ok_or_else(|| AuthError::new(AuthErrorCode::UserNotFound))?;

        if account.failed_attempts >= self.settings.max_failed_sign_ins {
            return Err(AuthErrorCode::TooManyRequests.into());
        }

        // federated-only accounts have no password to check against
        let Some(hash) = account.password_hash.as_deref() else {
            return Err(AuthErrorCode::InvalidCredential.into());
        };

        if !verify_password(password, hash)? {
            self.conn
                .execute(
                    "UPDATE accounts SET failed_attempts = failed_attempts + 1 WHERE uid = ?1",
                    [&account.uid],
                )
                .map_err(internal)?;
            return Err(AuthErrorCode::WrongPassword.into());
        }

        self.conn
            .execute(
                "UPDATE accounts SET failed_attempts = 0 WHERE uid = ?1",
                [&account.uid],
            )
            .map_err(internal)?;

        let user = self
            .load_user(&account.uid)?
            .ok_or_else(|| AuthError::new(AuthErrorCode::UserNotFound))?;
        self.set_current(Some(user.clone()))?;
        Ok(user)
    }

    fn sign_in_with_federated(&self, identity: &FederatedIdentity) -> AuthResult<AuthUser> {
        if !is_valid_email(&identity.email) {
            return Err(AuthErrorCode::InvalidEmail.into());
        }

        let uid = match self.find_account(&identity.email)? {
            Some(acc) => acc.uid,
            None => self.insert_account(
                &identity.email,
                identity.display_name.as_deref(),
                None,
                true,
            )?,
        };
        self.add_provider(&uid, &identity.provider)?;

        let user = self
            .load_user(&uid)?
            .ok_or_else(|| AuthError::new(AuthErrorCode::UserNotFound))?;
        self.set_current(Some(user.clone()))?;
        Ok(user)
    }

    fn sign_out(&self) -> AuthResult<()> {
        self.set_current(None)
    }

    fn send_password_reset_email(&self, email: &str) -> AuthResult<()> {
        if !is_valid_email(email) {
            return Err(AuthErrorCode::InvalidEmail.into());
        }
        let account = self
            .find_account(email)?
            .ok_or_else(|| AuthError::new(AuthErrorCode::UserNotFound))?;

        let code = self.issue_action_code(&account.uid, "reset")?;
        self.mailer
            .send(
                email,
                "Reset your password",
                &format!("Use this code to reset your password: {code}"),
            )
            .map_err(internal)
    }

    fn confirm_password_reset(&self, code: &str, new_password: &str) -> AuthResult<()> {
        self.check_new_password(new_password)?;
        let uid = self.take_action_code(code, "reset")?;
        let hash = hash_password(new_password)?;

        self.conn
            .execute(
                "UPDATE accounts SET password_hash = ?1, failed_attempts = 0 WHERE uid = ?2",
                params![hash, uid],
            )
            .map_err(internal)?;
        self.add_provider(&uid, &ProviderId::Password)
    }

    fn update_password(&self, new_password: &str) -> AuthResult<()> {
        let user = self.require_current()?;
        self.check_new_password(new_password)?;
        let hash = hash_password(new_password)?;

        self.conn
            .execute(
                "UPDATE accounts SET password_hash = ?1, failed_attempts = 0 WHERE uid = ?2",
                params![hash, user.uid],
            )
            .map_err(internal)?;
        self.add_provider(&user.uid, &ProviderId::Password)?;

        self.set_current(self.load_user(&user.uid)?)
    }

    fn send_email_verification(&self) -> AuthResult<()> {
        let user = self.require_current()?;
        let email = user
            .email
            .as_deref()
            .ok_or_else(|| AuthError::new(AuthErrorCode::InvalidEmail))?;

        let code = self.issue_action_code(&user.uid, "verify")?;
        self.mailer
            .send(
                email,
                "Verify your email",
                &format!("Use this code to verify your email address: {code}"),
            )
            .map_err(internal)
    }

    /// Mark the address behind a verification code as verified.
    fn apply_verification_code(&self, code: &str) -> AuthResult<()> {
        let uid = self.take_action_code(code, "verify")?;
        self.conn
            .execute("UPDATE accounts SET email_verified = 1 WHERE uid = ?1", [&uid])
            .map_err(internal)?;

        let is_current = self
            .current
            .borrow()
            .as_ref()
            .is_some_and(|u| u.uid == uid);
        if is_current {
            self.set_current(self.load_user(&uid)?)?;
        }
        Ok(())
    }

    fn delete_current_user(&self) -> AuthResult<()> {
        let user = self.require_current()?;
        self.conn
            .execute("DELETE FROM accounts WHERE uid = ?1", [&user.uid])
            .map_err(internal)?;
        self.set_current(None)
    }
}
