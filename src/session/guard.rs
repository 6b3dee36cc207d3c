//! Decides whether protected content may render.

use super::context::{SessionContext, SessionState};
use crate::routes::Route;

pub const LOADING_PLACEHOLDER: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    Loading,
    Redirect(Route),
    Rendered(T),
}

impl<T> Guarded<T> {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Guarded::Rendered(_))
    }
}

pub fn decide(state: &SessionState) -> Guarded<()> {
    if state.loading {
        Guarded::Loading
    } else if !state.logged_in {
        Guarded::Redirect(Route::SignIn)
    } else {
        Guarded::Rendered(())
    }
}

pub struct AuthGuard<'a> {
    session: &'a SessionContext,
}

impl<'a> AuthGuard<'a> {
    pub fn new(session: &'a SessionContext) -> Self {
        Self { session }
    }

    /// Evaluate `children` only when the session allows it.
    pub fn render<T, E>(&self, children: impl FnOnce() -> Result<T, E>) -> Result<Guarded<T>, E> {
        match decide(&self.session.state()) {
            Guarded::Loading => Ok(Guarded::Loading),
            Guarded::Redirect(r) => Ok(Guarded::Redirect(r)),
            Guarded::Rendered(()) => children().map(Guarded::Rendered),
        }
    }
}
