use crate::backend::store::{Document, DocumentStore, Fields};
use crate::errors::{AppError, AppResult};
use crate::utils::ids::random_id;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::rc::Rc;

const DOC_ID_LEN: usize = 20;

/// Document store persisted in the `documents` table, one JSON body per row.
#[derive(Clone)]
pub struct LocalStore {
    conn: Rc<Connection>,
}

impl LocalStore {
    pub fn new(conn: Rc<Connection>) -> Self {
        Self { conn }
    }
}

fn map_row(row: &Row) -> rusqlite::Result<(String, String)> {
    Ok((row.get("id")?, row.get("data")?))
}

fn parse_body(id: String, raw: &str) -> AppResult<Document> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value {
        serde_json::Value::Object(data) => Ok(Document::new(id, data)),
        _ => Err(AppError::MalformedDocument(id)),
    }
}

impl DocumentStore for LocalStore {
    fn get_all(&self, collection: &str) -> AppResult<Vec<Document>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, data FROM documents
             WHERE collection = ?1
             ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map([collection], map_row)?;

        let mut out = Vec::new();
        for r in rows {
            let (id, raw) = r?;
            out.push(parse_body(id, &raw)?);
        }
        Ok(out)
    }

    fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, data FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                map_row,
            )
            .optional()?;

        row.map(|(id, raw)| parse_body(id, &raw)).transpose()
    }

    fn add(&self, collection: &str, data: Fields) -> AppResult<String> {
        let id = random_id(DOC_ID_LEN);
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO documents (collection, id, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![collection, id, serde_json::to_string(&data)?, now],
        )?;
        Ok(id)
    }

    fn set(&self, collection: &str, id: &str, data: Fields) -> AppResult<()> {
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO documents (collection, id, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(collection, id) DO UPDATE
             SET data = excluded.data, updated_at = excluded.updated_at",
            params![collection, id, serde_json::to_string(&data)?, now],
        )?;
        Ok(())
    }

    fn update(&self, collection: &str, id: &str, data: Fields) -> AppResult<()> {
        let mut doc = self
            .get(collection, id)?
            .ok_or_else(|| AppError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        for (k, v) in data {
            doc.data.insert(k, v);
        }

        self.conn.execute(
            "UPDATE documents SET data = ?1, updated_at = ?2
             WHERE collection = ?3 AND id = ?4",
            params![
                serde_json::to_string(&doc.data)?,
                Local::now().to_rfc3339(),
                collection,
                id
            ],
        )?;
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        Ok(())
    }
}
