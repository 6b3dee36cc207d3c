use super::open_backend;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREY, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Mail { print: true }) {
        return Ok(());
    }

    let local = open_backend(cfg)?;
    let outbox = local.mailer.outbox()?;

    if outbox.is_empty() {
        println!("📭 Outbox is empty.");
        return Ok(());
    }

    println!("📬 Outbox:\n");
    for m in outbox {
        println!("{CYAN}#{} {}{RESET} → {}", m.id, m.subject, m.recipient);
        println!("{GREY}{}{RESET}", m.created_at);
        for line in m.body.lines() {
            println!("    {line}");
        }
        println!();
    }

    Ok(())
}
