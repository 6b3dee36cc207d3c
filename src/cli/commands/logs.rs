use super::{guarded, open_backend, page_index};
use crate::cli::parser::{Commands, LogsCmd};
use crate::config::Config;
use crate::core::Backend;
use crate::core::access_logs::AccessLogsPage;
use crate::core::table::TableView;
use crate::errors::{AppError, AppResult};
use crate::export::resolve_output;
use crate::models::access_log::AccessLogRow;
use crate::ui::messages::{error, info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::colors::{colorize_in_out, colorize_optional};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Logs { action } = cmd else {
        return Ok(());
    };

    let local = open_backend(cfg)?;

    guarded(&local, cfg, || {
        let mut page = AccessLogsPage::load(Backend::local(&local))?;
        page.table.set_rows_per_page(cfg.rows_per_page);

        match action {
            LogsCmd::List { search, page: p, rows } => {
                if let Some(n) = rows {
                    page.table.set_rows_per_page(*n);
                }
                if let Some(term) = search {
                    page.table.set_search(term);
                }
                page.table.set_page(page_index(*p));
                print_page(&page.table);
            }

            LogsCmd::Delete { ids, all, yes } => {
                // a single row goes without confirmation
                if !*all && ids.len() == 1 {
                    let removed = page.delete(&ids[0])?;
                    success(format!("Deleted access log of {}.", removed.name));
                    return Ok(());
                }

                if *all {
                    page.table.select_all(true);
                } else {
                    for id in ids {
                        if page.table.find(id).is_none() {
                            return Err(AppError::UnknownAccessLog(id.clone()));
                        }
                        page.table.select_row(id);
                    }
                }

                let n = page.table.selected().len();
                if n == 0 {
                    warning("No access logs selected.");
                    return Ok(());
                }
                if !confirm(&format!("Delete {n} selected access logs?"), *yes)? {
                    page.table.clear_selection();
                    warning("Delete cancelled.");
                    return Ok(());
                }

                let outcome = page.delete_selected();
                for (id, e) in &outcome.failed {
                    error(format!("Failed to delete {id}: {e}"));
                }
                if outcome.failed.is_empty() {
                    success(format!("Deleted {} access logs.", outcome.done.len()));
                } else {
                    warning(format!(
                        "Deleted {} of {} access logs.",
                        outcome.done.len(),
                        outcome.requested()
                    ));
                }
            }

            LogsCmd::Export {
                format,
                file,
                force,
            } => {
                let path = resolve_output(file.as_deref(), &cfg.export_dir, *format);
                page.export(*format, &path, *force)?;
            }
        }

        Ok(())
    })
}

fn print_page(table: &TableView<AccessLogRow>) {
    let mut out = Table::new(&["ID", "Name", "Position", "Date", "Check-In", "Check-Out"]);
    for r in table.page_rows() {
        out.add_row(vec![
            r.id.clone(),
            colorize_optional(&r.name),
            colorize_optional(&r.position),
            colorize_optional(&r.date),
            colorize_in_out(&r.checkin_time, true),
            colorize_in_out(&r.checkout_time, false),
        ]);
    }

    if out.is_empty() {
        info("No access logs found.");
        return;
    }

    print!("{}", out.render());
    println!(
        "\nPage {} of {} · {} of {} access logs",
        table.page() + 1,
        table.page_count().max(1),
        table.filtered().len(),
        table.rows().len()
    );
}
