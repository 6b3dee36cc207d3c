//! `open <path>`: resolve a console path the way the router does and show
//! that page.

use super::{analytics, logs, open_backend, users};
use crate::cli::parser::{Commands, LogsCmd, UsersCmd};
use crate::config::Config;
use crate::core::Backend;
use crate::core::auth::visit_sign_in;
use crate::errors::{AppError, AppResult};
use crate::routes::Route;
use crate::ui::messages::{header, info};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Open { path } = cmd else {
        return Ok(());
    };

    let route = Route::resolve(path, &cfg.basename);

    match route {
        Route::NotFound(p) => Err(AppError::NotFound(p)),

        Route::SignIn => {
            let local = open_backend(cfg)?;
            visit_sign_in(&Backend::local(&local));
            header(&route);
            info("Signed out. Use `podguard signin --email <EMAIL> --password <PASSWORD>`.");
            Ok(())
        }

        Route::SignUp => {
            header(&route);
            info("Use `podguard signup --name <NAME> --email <EMAIL> --password <PASSWORD>`.");
            Ok(())
        }

        Route::Dashboard => analytics::handle(&Commands::Dashboard, cfg),
        Route::Analytics => analytics::handle(&Commands::Analytics, cfg),

        Route::Users => {
            header(&route);
            let list = Commands::Users {
                action: UsersCmd::List {
                    search: None,
                    page: None,
                    rows: None,
                },
            };
            users::handle(&list, cfg)
        }

        Route::AccessLogs => {
            header(&route);
            let list = Commands::Logs {
                action: LogsCmd::List {
                    search: None,
                    page: None,
                    rows: None,
                },
            };
            logs::handle(&list, cfg)
        }
    }
}
