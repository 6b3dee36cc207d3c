//! Analytics and dashboard figures derived from the access logs.
//!
//! Charts are reported as their numeric series; nothing here draws.

use super::Backend;
use super::access_logs::fetch_access_logs;
use crate::errors::AppResult;
use crate::models::access_log::{AccessLog, AccessLogRow};
use std::cmp::Reverse;

/// `"HH:MM[:SS]"` to minutes since midnight. Seconds are ignored.
pub fn time_to_minutes(s: &str) -> Option<u32> {
    let mut parts = s.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Integer mean of the values that parsed; 0 when there are none.
fn average(values: &[Option<u32>]) -> u32 {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0u64, 0u64), |(sum, count), &v| (sum + u64::from(v), count + 1));
    if count == 0 {
        return 0;
    }
    // the mean never exceeds the largest input, so it fits back into u32
    (sum / count) as u32
}

/// Per-record check-in/check-out minutes with their date labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub labels: Vec<String>,
    pub checkin: Vec<Option<u32>>,
    pub checkout: Vec<Option<u32>>,
}

impl TimeSeries {
    pub fn from_rows(rows: &[AccessLogRow]) -> Self {
        Self {
            labels: rows.iter().map(|r| r.date.clone()).collect(),
            checkin: rows.iter().map(|r| time_to_minutes(&r.checkin_time)).collect(),
            checkout: rows.iter().map(|r| time_to_minutes(&r.checkout_time)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub series: TimeSeries,
    pub average_checkin: u32,
    pub average_checkout: u32,
}

impl AnalyticsReport {
    pub fn from_rows(rows: &[AccessLogRow]) -> Self {
        let series = TimeSeries::from_rows(rows);
        Self {
            average_checkin: average(&series.checkin),
            average_checkout: average(&series.checkout),
            series,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub latest: Option<AccessLogRow>,
    pub latest_checkin: u32,
    pub average_checkin: u32,
    pub series: TimeSeries,
}

impl Dashboard {
    /// `logs` in any order; the newest date comes first.
    pub fn from_logs(mut logs: Vec<AccessLog>) -> Self {
        logs.sort_by_key(|l| Reverse(l.date));
        let rows: Vec<AccessLogRow> = logs.iter().map(AccessLog::to_row).collect();

        let series = TimeSeries::from_rows(&rows);
        let latest_checkin = series.checkin.first().copied().flatten().unwrap_or(0);

        Self {
            latest: rows.first().cloned(),
            latest_checkin,
            average_checkin: average(&series.checkin),
            series,
        }
    }
}

pub fn build_analytics(b: &Backend) -> AppResult<AnalyticsReport> {
    let rows: Vec<AccessLogRow> = fetch_access_logs(b)?.iter().map(AccessLog::to_row).collect();
    Ok(AnalyticsReport::from_rows(&rows))
}

pub fn build_dashboard(b: &Backend) -> AppResult<Dashboard> {
    Ok(Dashboard::from_logs(fetch_access_logs(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, checkin: &str, checkout: &str) -> AccessLogRow {
        AccessLogRow {
            id: date.into(),
            name: "Ann".into(),
            position: "intern".into(),
            date: date.into(),
            checkin_time: checkin.into(),
            checkout_time: checkout.into(),
        }
    }

    #[test]
    fn minutes_since_midnight() {
        assert_eq!(time_to_minutes("08:15:00"), Some(495));
        assert_eq!(time_to_minutes("09:00:00"), Some(540));
        assert_eq!(time_to_minutes("09:00"), Some(540));
        assert_eq!(time_to_minutes(""), None);
        assert_eq!(time_to_minutes("nine"), None);
        assert_eq!(time_to_minutes("25:00"), None);
    }

    #[test]
    fn averages_skip_unparseable_values() {
        let rows = [
            row("2025-03-01", "08:15:00", "17:00:00"),
            row("2025-03-02", "09:00:00", ""),
            row("2025-03-03", "", "18:00:00"),
        ];
        let report = AnalyticsReport::from_rows(&rows);
        assert_eq!(report.average_checkin, (495 + 540) / 2);
        assert_eq!(report.average_checkout, (1020 + 1080) / 2);
        assert_eq!(report.series.len(), 3);
    }

    #[test]
    fn average_of_many_late_check_outs_does_not_overflow() {
        let values = vec![Some(1439); 3_000_000];
        assert_eq!(average(&values), 1439);
    }

    #[test]
    fn empty_dashboard_is_all_zero() {
        let d = Dashboard::from_logs(Vec::new());
        assert!(d.latest.is_none());
        assert_eq!(d.latest_checkin, 0);
        assert_eq!(d.average_checkin, 0);
        assert!(d.series.is_empty());
    }
}
