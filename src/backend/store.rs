//! Document store contract: named collections of schemaless JSON documents
//! addressed by a backend-assigned identifier.

use crate::errors::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub type Fields = Map<String, Value>;

pub const USERS: &str = "users";
pub const EMPLOYEES: &str = "Employee";
pub const ACCESS: &str = "Access";

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Deserialize the document body into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_value(Value::Object(self.data.clone()))
            .map_err(|e| AppError::MalformedDocument(format!("{}: {e}", self.id)))
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// Serialize a typed record into document fields.
pub fn to_fields<T: Serialize>(value: &T) -> AppResult<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::MalformedDocument(format!(
            "expected an object, got {other}"
        ))),
    }
}

pub trait DocumentStore {
    /// Full snapshot of a collection, in insertion order.
    fn get_all(&self, collection: &str) -> AppResult<Vec<Document>>;

    fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    /// Create a document with a fresh identifier and return it.
    fn add(&self, collection: &str, data: Fields) -> AppResult<String>;

    /// Create or overwrite the document at `id`.
    fn set(&self, collection: &str, id: &str, data: Fields) -> AppResult<()>;

    /// Merge `data` into an existing document. Fails when it does not exist.
    fn update(&self, collection: &str, id: &str, data: Fields) -> AppResult<()>;

    /// Delete a document. Deleting a missing document is not an error.
    fn delete(&self, collection: &str, id: &str) -> AppResult<()>;
}
