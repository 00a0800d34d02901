//! Hook for reacting to session loss.

use crate::error::AuthError;

/// Receives session lifecycle notifications from an [`AuthClient`].
///
/// The client has no UI of its own; a front end implements this to tell the
/// user to log in again and send them to the login entry point.
///
/// The trait is object-safe and used as `Arc<dyn SessionObserver>`.
///
/// [`AuthClient`]: crate::AuthClient
pub trait SessionObserver: Send + Sync {
    /// Called once per failed refresh, before the failure is returned.
    fn session_expired(&self, error: &AuthError);
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn session_expired(&self, _error: &AuthError) {}
}
