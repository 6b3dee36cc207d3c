//! Application-wide mirror of the provider's auth state.
//!
//! The subscription callback is the only writer; views read snapshots via
//! [`SessionContext::state`].

use super::provider::ProviderKind;
use crate::backend::auth::{AuthProvider, AuthUser, Persistence};
use crate::backend::listeners::Subscription;
use crate::ui::messages::error;
use std::cell::RefCell;
use std::rc::Rc;

pub const INIT_FAILURE_MESSAGE: &str = "Failed to initialize authentication. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub loading: bool,
    pub logged_in: bool,
    pub provider: ProviderKind,
    pub current_user: Option<AuthUser>,
    pub error_message: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            loading: true,
            logged_in: false,
            provider: ProviderKind::Unknown,
            current_user: None,
            error_message: None,
        }
    }
}

impl SessionState {
    pub fn is_email_user(&self) -> bool {
        self.provider.is_email()
    }

    pub fn is_google_user(&self) -> bool {
        self.provider.is_google()
    }

    /// Apply one auth-state notification.
    pub fn apply(&mut self, user: Option<&AuthUser>) {
        match user {
            Some(u) => {
                self.provider = ProviderKind::classify(u);
                self.current_user = Some(u.clone());
                self.logged_in = true;
            }
            None => {
                self.provider = ProviderKind::Unknown;
                self.current_user = None;
                self.logged_in = false;
            }
        }
        self.loading = false;
    }

    fn fail(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
        self.logged_in = false;
        self.loading = false;
    }
}

#[derive(Default)]
pub struct SessionContext {
    state: Rc<RefCell<SessionState>>,
    subscription: RefCell<Option<Subscription>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context already attached to `auth`.
    pub fn start<A: AuthProvider + ?Sized>(auth: &A) -> Self {
        let ctx = Self::new();
        ctx.attach(auth);
        ctx
    }

    /// Enable durable persistence and subscribe to auth-state changes.
    /// Replaces any previous subscription. On failure the context leaves
    /// `loading` as logged out, carrying [`INIT_FAILURE_MESSAGE`].
    pub fn attach<A: AuthProvider + ?Sized>(&self, auth: &A) {
        self.detach();

        let state = Rc::clone(&self.state);
        let result = auth.set_persistence(Persistence::Local).and_then(|_| {
            auth.on_auth_state_changed(Box::new(move |user| {
                state.borrow_mut().apply(user);
            }))
        });

        match result {
            Ok(sub) => {
                *self.subscription.borrow_mut() = Some(sub);
            }
            Err(e) => {
                error(format!("Error initializing authentication: {e}"));
                self.state.borrow_mut().fail(INIT_FAILURE_MESSAGE);
            }
        }
    }

    /// Tear down the subscription. The last known state is kept.
    pub fn detach(&self) {
        if let Some(sub) = self.subscription.borrow_mut().take() {
            sub.unsubscribe();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }
}
