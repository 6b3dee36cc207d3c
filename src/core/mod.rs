pub mod access_logs;
pub mod analytics;
pub mod auth;
pub mod auth_messages;
pub mod log;
pub mod table;
pub mod users;

use crate::backend::local::LocalBackend;
use crate::backend::{AuthProvider, DocumentStore, Mailer};
use rusqlite::Connection;

/// The backend services a page talks to, borrowed for the page's lifetime.
#[derive(Clone, Copy)]
pub struct Backend<'a> {
    pub auth: &'a dyn AuthProvider,
    pub store: &'a dyn DocumentStore,
    pub mailer: &'a dyn Mailer,
    pub audit: &'a Connection,
}

impl<'a> Backend<'a> {
    pub fn local(b: &'a LocalBackend) -> Self {
        Self {
            auth: &b.auth,
            store: &b.store,
            mailer: &b.mailer,
            audit: &b.pool.conn,
        }
    }
}
