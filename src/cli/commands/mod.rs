pub mod analytics;
pub mod auth;
pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod logs;
pub mod mail;
pub mod open;
pub mod users;

use crate::backend::local::LocalBackend;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::session::{AuthGuard, Guarded, SessionContext};
use crate::ui::messages::info;

pub(crate) fn open_backend(cfg: &Config) -> AppResult<LocalBackend> {
    LocalBackend::open(&cfg.database, cfg.auth_settings())
}

/// Run a protected page: the session resolves first, and `page` only runs
/// for a signed-in account.
pub(crate) fn guarded<T>(
    local: &LocalBackend,
    cfg: &Config,
    page: impl FnOnce() -> AppResult<T>,
) -> AppResult<T> {
    let session = SessionContext::start(&local.auth);

    match AuthGuard::new(&session).render(page)? {
        Guarded::Rendered(v) => Ok(v),
        Guarded::Redirect(route) => {
            if let Some(msg) = session.state().error_message {
                info(msg);
            }
            Err(AppError::NotSignedIn(format!(
                "{}{}",
                cfg.basename.trim_end_matches('/'),
                route.path()
            )))
        }
        Guarded::Loading => Err(AppError::SessionLoading),
    }
}

/// 1-based page from the command line to the table's 0-based index.
pub(crate) fn page_index(page: Option<usize>) -> usize {
    page.unwrap_or(1).saturating_sub(1)
}
