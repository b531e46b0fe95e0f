//! Invalidation events raised by storage providers.
//!
//! Caches and dependent providers register an [`InvalidationListener`] on the
//! session to react to removals (for example dropping client scope links from
//! clients before the scope disappears).

use std::fmt::Debug;

use kc_model::ClientScope;

/// Event dispatched through [`crate::KeycloakSession::invalidate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationEvent {
    /// A client scope is about to be removed.
    ClientScopeBeforeRemove {
        /// Realm the scope belongs to.
        realm_id: String,
        /// The scope being removed.
        scope: ClientScope,
    },
    /// A client scope has been removed.
    ClientScopeAfterRemove {
        /// The removed scope.
        scope: ClientScope,
    },
}

impl InvalidationEvent {
    /// Short name used in log output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ClientScopeBeforeRemove { .. } => "CLIENT_SCOPE_BEFORE_REMOVE",
            Self::ClientScopeAfterRemove { .. } => "CLIENT_SCOPE_AFTER_REMOVE",
        }
    }
}

/// Receives invalidation events.
pub trait InvalidationListener: Send + Sync + Debug {
    /// Called synchronously for every event, in registration order.
    fn invalidate(&self, event: &InvalidationEvent);
}
