use super::{guarded, open_backend, page_index};
use crate::cli::parser::{Commands, UsersCmd};
use crate::config::Config;
use crate::core::Backend;
use crate::core::table::{HeaderCheckbox, TableView};
use crate::core::users::UsersPage;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeeForm, EmployeePatch};
use crate::models::position::{Gender, Position};
use crate::ui::messages::{error, info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::colors::{colorize_optional, colorize_status};
use crate::utils::table::Table;

fn parse_position(raw: Option<&str>) -> AppResult<Option<Position>> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => Position::from_code(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidPosition(s.to_string())),
    }
}

fn parse_gender(raw: Option<&str>) -> AppResult<Option<Gender>> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => Gender::from_code(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidGender(s.to_string())),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Users { action } = cmd else {
        return Ok(());
    };

    let local = open_backend(cfg)?;

    guarded(&local, cfg, || {
        let mut page = UsersPage::load(Backend::local(&local))?;
        page.table.set_rows_per_page(cfg.rows_per_page);

        match action {
            UsersCmd::List { search, page: p, rows } => {
                if let Some(n) = rows {
                    page.table.set_rows_per_page(*n);
                }
                if let Some(term) = search {
                    page.table.set_search(term);
                }
                page.table.set_page(page_index(*p));
                print_page(&page.table);
            }

            UsersCmd::Add {
                name,
                email,
                position,
                gender,
            } => {
                let form = EmployeeForm {
                    name: name.clone(),
                    email: email.clone(),
                    position: parse_position(position.as_deref())?,
                    gender: parse_gender(gender.as_deref())?,
                };
                let e = page.add(form)?;
                success(format!(
                    "Added {} ({}) with id {}",
                    e.name,
                    e.uid.as_deref().unwrap_or_default(),
                    e.id
                ));
            }

            UsersCmd::Edit {
                id,
                name,
                email,
                position,
                gender,
            } => {
                let patch = EmployeePatch {
                    name: name.clone(),
                    email: email.clone(),
                    position: parse_position(position.as_deref())?,
                    gender: parse_gender(gender.as_deref())?,
                    status: None,
                };
                if patch.is_empty() {
                    warning("Nothing to update.");
                    return Ok(());
                }
                page.update(id, patch)?;
                success(format!("Employee {id} updated."));
            }

            UsersCmd::Toggle { id } => {
                let status = page.toggle_status(id)?;
                success(format!("Employee {id} is now {}", colorize_status(status.as_str())));
            }

            UsersCmd::Delete { ids, all, yes } => {
                if *all {
                    page.table.select_all(true);
                } else if ids.len() == 1 {
                    let id = &ids[0];
                    let name = page
                        .table
                        .find(id)
                        .map(|e| e.name.clone())
                        .ok_or_else(|| AppError::UnknownEmployee(id.clone()))?;
                    if !confirm(&format!("Delete {name}?"), *yes)? {
                        warning("Delete cancelled.");
                        return Ok(());
                    }
                    page.delete(id)?;
                    success(format!("Deleted {name}."));
                    return Ok(());
                } else {
                    for id in ids {
                        if page.table.find(id).is_none() {
                            return Err(AppError::UnknownEmployee(id.clone()));
                        }
                        page.table.select_row(id);
                    }
                }

                let n = page.table.selected().len();
                if n == 0 {
                    warning("No employees selected.");
                    return Ok(());
                }
                if !confirm(&format!("Delete {n} selected employees?"), *yes)? {
                    page.table.clear_selection();
                    warning("Delete cancelled.");
                    return Ok(());
                }

                let outcome = page.delete_selected();
                for (id, e) in &outcome.failed {
                    error(format!("Failed to delete {id}: {e}"));
                }
                if outcome.failed.is_empty() {
                    success(format!("Deleted {} employees.", outcome.done.len()));
                } else {
                    warning(format!(
                        "Deleted {} of {} employees.",
                        outcome.done.len(),
                        outcome.requested()
                    ));
                }
            }
        }

        Ok(())
    })
}

fn print_page(table: &TableView<Employee>) {
    let mark = match table.header_checkbox() {
        HeaderCheckbox::Unchecked => "[ ]",
        HeaderCheckbox::Indeterminate => "[-]",
        HeaderCheckbox::Checked => "[x]",
    };

    let mut out = Table::new(&[mark, "ID", "UID", "Name", "Email", "Position", "Gender", "Status"]);
    for e in table.page_rows() {
        let sel = if table.is_selected(&e.id) { "[x]" } else { "[ ]" };
        out.add_row(vec![
            sel.to_string(),
            e.id.clone(),
            colorize_optional(e.uid.as_deref().unwrap_or_default()),
            e.name.clone(),
            e.email.clone(),
            colorize_optional(e.position_str()),
            colorize_optional(e.gender_str()),
            colorize_status(e.status.as_str()),
        ]);
    }

    if out.is_empty() {
        info("No employees found.");
        return;
    }

    print!("{}", out.render());
    println!(
        "\nPage {} of {} · {} of {} employees",
        table.page() + 1,
        table.page_count().max(1),
        table.filtered().len(),
        table.rows().len()
    );
}
