use crate::backend::store::Document;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One check-in/check-out record from the `Access` collection.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessLog {
    pub id: String,
    pub name: String,
    pub position: String,
    pub date: Option<NaiveDate>,
    pub checkin: Option<NaiveDateTime>,
    pub checkout: Option<NaiveDateTime>,
}

/// Display form of an [`AccessLog`]: every cell already rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessLogRow {
    pub id: String,
    pub name: String,
    pub position: String,
    pub date: String,
    pub checkin_time: String,
    pub checkout_time: String,
}

/// Accepts RFC 3339 (converted to local time) or a naive `YYYY-MM-DD[T ]HH:MM[:SS]`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    formats
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(s).map(|dt| dt.date()))
}

impl AccessLog {
    /// Lenient read: missing text fields become empty, unreadable
    /// timestamps become `None`.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            name: doc.str_field("name").unwrap_or_default().to_string(),
            position: doc.str_field("position").unwrap_or_default().to_string(),
            date: doc.str_field("date").and_then(parse_date),
            checkin: doc.str_field("checkin").and_then(parse_timestamp),
            checkout: doc.str_field("checkout").and_then(parse_timestamp),
        }
    }

    pub fn to_row(&self) -> AccessLogRow {
        let time = |t: &Option<NaiveDateTime>| {
            t.map(|dt| dt.format("%H:%M:%S").to_string())
                .unwrap_or_default()
        };
        AccessLogRow {
            id: self.id.clone(),
            name: self.name.clone(),
            position: self.position.clone(),
            date: self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            checkin_time: time(&self.checkin),
            checkout_time: time(&self.checkout),
        }
    }
}
