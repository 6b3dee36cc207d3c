use crate::backend::auth::{AuthUser, ProviderId};
use serde::Serialize;
use std::fmt;

/// How the signed-in account authenticated, derived once when the session
/// resolves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum ProviderKind {
    Email,
    Federated(String),
    #[default]
    Unknown,
}

impl ProviderKind {
    /// A password provider wins over any federated one linked to the same
    /// account.
    pub fn classify(user: &AuthUser) -> Self {
        if user.has_provider(&ProviderId::Password) {
            return ProviderKind::Email;
        }
        match user.providers.first() {
            Some(p) => ProviderKind::Federated(p.as_str().to_string()),
            None => ProviderKind::Unknown,
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, ProviderKind::Email)
    }

    pub fn is_google(&self) -> bool {
        matches!(self, ProviderKind::Federated(id) if id == ProviderId::Google.as_str())
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Email => f.write_str("email/password"),
            ProviderKind::Federated(id) => write!(f, "federated ({id})"),
            ProviderKind::Unknown => f.write_str("unknown"),
        }
    }
}
