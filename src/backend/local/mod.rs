//! Local backend: authentication, document store and outbox persisted in a
//! single SQLite file.

mod auth;
mod mail;
mod store;

pub use auth::{AuthSettings, LocalAuth};
pub use mail::{LocalMailer, OutboxMail};
pub use store::LocalStore;

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::rc::Rc;

pub struct LocalBackend {
    pub pool: DbPool,
    pub auth: LocalAuth,
    pub store: LocalStore,
    pub mailer: LocalMailer,
}

impl LocalBackend {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &str, settings: AuthSettings) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?, settings)
    }

    pub fn in_memory(settings: AuthSettings) -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?, settings)
    }

    pub fn from_pool(pool: DbPool, settings: AuthSettings) -> AppResult<Self> {
        init_db(&pool.conn)?;

        let mailer = LocalMailer::new(pool.shared());
        let store = LocalStore::new(pool.shared());
        let auth = LocalAuth::new(pool.shared(), mailer.clone(), settings)?;

        Ok(Self {
            pool,
            auth,
            store,
            mailer,
        })
    }

    pub fn conn(&self) -> Rc<Connection> {
        self.pool.shared()
    }
}
