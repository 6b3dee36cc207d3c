//! Console feedback of the admin console.
//!
//! Status lines start with a coloured icon. Errors go to stderr so they
//! never interleave with tables piped elsewhere. Pages open with their
//! route title, underlined to its width, and the path it was served from.

use crate::routes::Route;
use crate::utils::colors::GREY;
use crate::utils::formatting::visible_width;
use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn status_line(color: &str, icon: &str, msg: impl fmt::Display) -> String {
    format!("{color}{BOLD}{icon} {RESET}{msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", status_line(FG_BLUE, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", status_line(FG_GREEN, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", status_line(FG_YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", status_line(FG_RED, ICON_ERR, msg));
}

fn page_header(route: &Route) -> String {
    let title = route.title();
    let rule = "═".repeat(visible_width(title));
    format!("{FG_BLUE}{BOLD}{title}{RESET}  {GREY}{}{RESET}\n{FG_BLUE}{rule}{RESET}", route.path())
}

/// Title block printed before a page's content.
pub fn header(route: &Route) {
    println!("{}\n", page_header(route));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_rule_matches_the_title() {
        let out = page_header(&Route::AccessLogs);
        let mut lines = out.lines();

        let first = lines.next().unwrap();
        assert!(first.contains("Access Logs"));
        assert!(first.contains("/access-logs"));

        let rule = lines.next().unwrap();
        assert_eq!(visible_width(rule), "Access Logs".len());
    }
}
