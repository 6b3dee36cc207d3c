// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Interpret an access-log cell as a date (`YYYY-MM-DD`) or a time of day
/// (`HH:MM:SS`) and return the Excel number format plus the serial value.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
        return Some(("yyyy-mm-dd", (d - epoch).num_days() as f64));
    }

    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        let seconds = t.num_seconds_from_midnight() as f64;
        return Some(("hh:mm:ss", seconds / 86400.0));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_and_times_become_serials() {
        assert_eq!(parse_to_excel_date("1900-01-01"), Some(("yyyy-mm-dd", 2.0)));
        assert_eq!(parse_to_excel_date("12:00:00"), Some(("hh:mm:ss", 0.5)));
        assert_eq!(parse_to_excel_date("intern"), None);
        assert_eq!(parse_to_excel_date(""), None);
    }
}
