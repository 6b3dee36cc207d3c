//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! The connection is reference-counted so that the local backend pieces
//! (auth, store, mailer) share the same handle.

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;
use std::rc::Rc;

pub struct DbPool {
    pub conn: Rc<Connection>,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::configure(conn)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> AppResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Rc::new(conn),
        })
    }

    pub fn shared(&self) -> Rc<Connection> {
        Rc::clone(&self.conn)
    }
}
