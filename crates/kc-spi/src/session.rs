//! Keycloak session management.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::invalidation::{InvalidationEvent, InvalidationListener};

/// A Keycloak session represents a unit of work.
///
/// Providers hold a reference to the session to dispatch invalidation
/// events to registered listeners.
#[derive(Debug)]
pub struct KeycloakSession {
    /// Unique session identifier.
    id: Uuid,

    /// Listeners notified on invalidation.
    listeners: RwLock<Vec<Arc<dyn InvalidationListener>>>,

    /// Whether this session has been closed.
    closed: RwLock<bool>,
}

impl KeycloakSession {
    /// Creates a new session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            listeners: RwLock::new(Vec::new()),
            closed: RwLock::new(false),
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Registers an invalidation listener.
    pub fn add_listener(&self, listener: Arc<dyn InvalidationListener>) {
        self.listeners.write().push(listener);
    }

    /// Dispatches an event to every registered listener.
    ///
    /// Events raised on a closed session are dropped.
    pub fn invalidate(&self, event: &InvalidationEvent) {
        if self.is_closed() {
            tracing::warn!(
                session_id = %self.id,
                kind = event.kind(),
                "invalidation on closed session dropped"
            );
            return;
        }

        tracing::trace!(session_id = %self.id, kind = event.kind(), "invalidate");
        let listeners = self.listeners.read().clone();
        for listener in &listeners {
            listener.invalidate(event);
        }
    }

    /// Returns whether the session has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.closed.read()
    }

    /// Closes the session.
    ///
    /// After closing, the session should not be used.
    pub fn close(&self) {
        *self.closed.write() = true;
        self.listeners.write().clear();
    }
}

impl Default for KeycloakSession {
    fn default() -> Self {
        Self::new()
    }
}
