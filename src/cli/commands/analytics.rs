//! `analytics` and `dashboard`: the access-log figures as plain tables.

use super::{guarded, open_backend};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Backend;
use crate::core::analytics::{AnalyticsReport, Dashboard, TimeSeries, build_analytics, build_dashboard};
use crate::errors::AppResult;
use crate::routes::Route;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::minutes2clock;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let local = open_backend(cfg)?;

    guarded(&local, cfg, || {
        let b = Backend::local(&local);
        match cmd {
            Commands::Analytics => print_analytics(&build_analytics(&b)?),
            Commands::Dashboard => print_dashboard(&build_dashboard(&b)?),
            _ => {}
        }
        Ok(())
    })
}

fn cell(m: Option<u32>) -> String {
    match m {
        Some(v) => format!("{v} ({})", minutes2clock(v)),
        None => format!("{GREY}--{RESET}"),
    }
}

fn print_series(series: &TimeSeries) {
    if series.is_empty() {
        info("No access logs recorded.");
        return;
    }

    let mut out = Table::new(&["Date", "Check-In (min)", "Check-Out (min)"]);
    for i in 0..series.len() {
        out.add_row(vec![
            series.labels[i].clone(),
            cell(series.checkin[i]),
            cell(series.checkout[i]),
        ]);
    }
    print!("{}", out.render());
}

pub(crate) fn print_analytics(report: &AnalyticsReport) {
    header(&Route::Analytics);
    print_series(&report.series);

    println!();
    println!(
        "{CYAN}• Average check-in :{RESET} {} ({})",
        report.average_checkin,
        minutes2clock(report.average_checkin)
    );
    println!(
        "{CYAN}• Average check-out:{RESET} {} ({})",
        report.average_checkout,
        minutes2clock(report.average_checkout)
    );
}

pub(crate) fn print_dashboard(d: &Dashboard) {
    header(&Route::Dashboard);

    match &d.latest {
        Some(r) => println!(
            "{CYAN}• Latest entry:{RESET} {} ({}) on {} · in {} · out {}",
            r.name, r.position, r.date, r.checkin_time, r.checkout_time
        ),
        None => println!("{CYAN}• Latest entry:{RESET} {GREY}none{RESET}"),
    }
    println!(
        "{CYAN}• Latest check-in :{RESET} {} ({})",
        d.latest_checkin,
        minutes2clock(d.latest_checkin)
    );
    println!(
        "{CYAN}• Average check-in:{RESET} {} ({})",
        d.average_checkin,
        minutes2clock(d.average_checkin)
    );
    println!();

    print_series(&d.series);
}
