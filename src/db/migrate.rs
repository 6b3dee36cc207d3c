use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_documents",
        description: "Created documents table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection  TEXT NOT NULL,
            id          TEXT NOT NULL,
            data        TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );
        "#,
    },
    Migration {
        version: "20250301_0002_accounts",
        description: "Created accounts, providers and session tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS accounts (
            uid              TEXT PRIMARY KEY,
            email            TEXT NOT NULL UNIQUE COLLATE NOCASE,
            display_name     TEXT,
            password_hash    TEXT,
            email_verified   INTEGER NOT NULL DEFAULT 0,
            failed_attempts  INTEGER NOT NULL DEFAULT 0,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS account_providers (
            uid       TEXT NOT NULL REFERENCES accounts(uid) ON DELETE CASCADE,
            provider  TEXT NOT NULL,
            PRIMARY KEY (uid, provider)
        );

        CREATE TABLE IF NOT EXISTS auth_session (
            id            INTEGER PRIMARY KEY CHECK (id = 1),
            uid           TEXT NOT NULL REFERENCES accounts(uid) ON DELETE CASCADE,
            signed_in_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0003_action_codes",
        description: "Created action_codes table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS action_codes (
            code        TEXT PRIMARY KEY,
            uid         TEXT NOT NULL REFERENCES accounts(uid) ON DELETE CASCADE,
            kind        TEXT NOT NULL CHECK(kind IN ('reset','verify')),
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0004_outbox",
        description: "Created outbox table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS outbox (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            recipient   TEXT NOT NULL,
            subject     TEXT NOT NULL,
            body        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        "#,
    },
];

/// Ensure that the `log` table exists. Applied migrations are recorded in it.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}

/// Versions known to this build, with their applied flag.
pub fn migration_status(conn: &Connection) -> AppResult<Vec<(&'static str, bool)>> {
    ensure_log_table(conn)?;
    MIGRATIONS
        .iter()
        .map(|m| -> AppResult<(&'static str, bool)> { Ok((m.version, is_applied(conn, m.version)?)) })
        .collect()
}
