use crate::backend::store::{ACCESS, EMPLOYEES, USERS};
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) DOCUMENTS PER COLLECTION
    //
    println!("{}• Collections:{}", CYAN, RESET);
    for collection in [EMPLOYEES, ACCESS, USERS] {
        let count: i64 = pool.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            [collection],
            |row| row.get(0),
        )?;
        println!("    {:<10} {}{}{}", collection, GREEN, count, RESET);
    }

    //
    // 3) ACCOUNTS / AUDIT
    //
    let accounts: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
    let log_lines: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;

    println!("{}• Accounts:{} {}{}{}", CYAN, RESET, GREEN, accounts, RESET);
    println!("{}• Log entries:{} {}", CYAN, RESET, log_lines);

    println!();
    Ok(())
}
