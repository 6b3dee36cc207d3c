//! Client-side contracts of the managed backend (authentication, document
//! store, outbound mail) and the bundled local implementation.

pub mod auth;
pub mod listeners;
pub mod local;
pub mod store;

pub use auth::{AuthProvider, AuthUser, Persistence, ProviderId};
pub use listeners::{AuthListener, Subscription};
pub use store::{Document, DocumentStore, Fields};

use crate::errors::AppResult;

/// Outbound mail (verification, password reset, welcome messages).
pub trait Mailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}
