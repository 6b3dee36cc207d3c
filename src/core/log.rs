use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;
use std::sync::OnceLock;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ansi regex"));
    re.replace_all(s, "").into_owned()
}

/// Colour of an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "signup" => Colour::Green,
        "del" | "delete_account" => Colour::Red,
        "edit" | "toggle" | "password" => Colour::Yellow,
        "signin" | "signout" | "reset" | "verify" => Colour::Cyan,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        let raw_date: String = row.get(1)?;
        let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or(raw_date);

        Ok(LogEntry {
            id: row.get(0)?,
            date,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }
    Ok(entries)
}

pub fn print_log(conn: &Connection) -> AppResult<()> {
    let entries = load_log(conn)?;

    if entries.is_empty() {
        println!("📜 Internal log is empty.");
        return Ok(());
    }

    let op_target = |e: &LogEntry| {
        if e.target.is_empty() {
            e.operation.clone()
        } else {
            format!("{} ({})", e.operation, e.target)
        }
    };

    let op_w = entries
        .iter()
        .map(|e| op_target(e).len())
        .max()
        .unwrap_or(10)
        .min(MAX_OP_WIDTH);
    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);
    let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

    println!("📜 Internal log:\n");

    for e in &entries {
        let color = color_for_operation(&e.operation);

        // truncate on the visible text, then colour only the operation word
        let visible = op_target(e);
        let visible = if visible.chars().count() > MAX_OP_WIDTH {
            let mut s: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
            s.push_str("...");
            s
        } else {
            visible
        };

        let colored = match visible.split_once(' ') {
            Some((op, rest)) => format!("{} {}", color.paint(op), rest),
            None => color.paint(visible.as_str()).to_string(),
        };

        let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

        println!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}",
            e.id,
            e.date,
            colored,
            padding,
            e.message,
            id_w = id_w,
            date_w = date_w
        );
    }

    Ok(())
}
