//! Unified application error type.
//! All modules (backend, session, core, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::backend::auth::AuthError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Backend errors
    // ---------------------------
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// User-facing message produced by a code-to-message lookup.
    #[error("{0}")]
    Rejected(String),

    #[error("Document not found: {collection}/{id}")]
    DocumentNotFound { collection: String, id: String },

    #[error("Malformed document {0}")]
    MalformedDocument(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid gender: {0}")]
    InvalidGender(String),

    #[error("Please enter a valid email address.")]
    InvalidEmail(String),

    #[error("No employee with id {0}")]
    UnknownEmployee(String),

    #[error("No access log with id {0}")]
    UnknownAccessLog(String),

    // ---------------------------
    // Session errors
    // ---------------------------
    #[error("Not signed in: open {0} first")]
    NotSignedIn(String),

    #[error("Authentication is still loading")]
    SessionLoading,

    #[error("Page not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
