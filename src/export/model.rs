// src/export/model.rs

use crate::models::access_log::AccessLogRow;
use serde::Serialize;

pub const SHEET_NAME: &str = "AccessLog";

/// Column headers, in order, for every format.
pub const HEADERS: [&str; 5] = ["Name", "Position", "Date", "Check-In Time", "Check-Out Time"];

/// Flat export record; serde names match [`HEADERS`].
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AccessLogExport {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Check-In Time")]
    pub checkin_time: String,
    #[serde(rename = "Check-Out Time")]
    pub checkout_time: String,
}

impl From<&AccessLogRow> for AccessLogExport {
    fn from(r: &AccessLogRow) -> Self {
        Self {
            name: r.name.clone(),
            position: r.position.clone(),
            date: r.date.clone(),
            checkin_time: r.checkin_time.clone(),
            checkout_time: r.checkout_time.clone(),
        }
    }
}

impl AccessLogExport {
    pub(crate) fn cells(&self) -> [&str; 5] {
        [
            &self.name,
            &self.position,
            &self.date,
            &self.checkin_time,
            &self.checkout_time,
        ]
    }
}
