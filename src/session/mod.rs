pub mod context;
pub mod guard;
pub mod provider;

pub use context::{SessionContext, SessionState};
pub use guard::{AuthGuard, Guarded};
pub use provider::ProviderKind;
