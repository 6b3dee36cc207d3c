use crate::backend::Mailer;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct OutboxMail {
    pub id: i64,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub created_at: String,
}

/// Queues mail in the `outbox` table instead of delivering it.
#[derive(Clone)]
pub struct LocalMailer {
    conn: Rc<Connection>,
}

impl LocalMailer {
    pub fn new(conn: Rc<Connection>) -> Self {
        Self { conn }
    }

    pub fn outbox(&self) -> AppResult<Vec<OutboxMail>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, recipient, subject, body, created_at FROM outbox ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(OutboxMail {
                id: row.get(0)?,
                recipient: row.get(1)?,
                subject: row.get(2)?,
                body: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}

impl Mailer for LocalMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO outbox (recipient, subject, body, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![to, subject, body, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
