//! Static path table of the console.

use std::fmt;

pub const BASENAME: &str = "/podguard";

pub mod paths {
    pub const ROOT: &str = "/";
    pub const SIGN_IN: &str = "/authentication/sign-in";
    pub const SIGN_UP: &str = "/authentication/sign-up";
    pub const USERS: &str = "/users";
    pub const ACCESS_LOGS: &str = "/access-logs";
    pub const ANALYTICS: &str = "/analytics";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    SignIn,
    SignUp,
    Users,
    AccessLogs,
    Analytics,
    NotFound(String),
}

impl Route {
    /// Resolve a path, with or without the `basename` prefix.
    /// Trailing slashes are ignored; anything unknown is [`Route::NotFound`].
    pub fn resolve(path: &str, basename: &str) -> Route {
        let trimmed = path.trim();
        let base = basename.trim_end_matches('/');

        let rest = if !base.is_empty() {
            match trimmed.strip_prefix(base) {
                Some(r) if r.is_empty() || r.starts_with('/') => r,
                _ => trimmed,
            }
        } else {
            trimmed
        };

        let normalized = rest.trim_end_matches('/');
        let normalized = if normalized.is_empty() {
            paths::ROOT
        } else {
            normalized
        };

        match normalized {
            paths::ROOT => Route::Dashboard,
            paths::SIGN_IN => Route::SignIn,
            paths::SIGN_UP => Route::SignUp,
            paths::USERS => Route::Users,
            paths::ACCESS_LOGS => Route::AccessLogs,
            paths::ANALYTICS => Route::Analytics,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Dashboard => paths::ROOT,
            Route::SignIn => paths::SIGN_IN,
            Route::SignUp => paths::SIGN_UP,
            Route::Users => paths::USERS,
            Route::AccessLogs => paths::ACCESS_LOGS,
            Route::Analytics => paths::ANALYTICS,
            Route::NotFound(p) => p,
        }
    }

    /// Routes rendered behind the auth guard.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Users | Route::AccessLogs | Route::Analytics
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::SignIn => "Sign in",
            Route::SignUp => "Sign up",
            Route::Users => "All Users",
            Route::AccessLogs => "Access Logs",
            Route::Analytics => "Analytics Overview",
            Route::NotFound(_) => "Page not found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
