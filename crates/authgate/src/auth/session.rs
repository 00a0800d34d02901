//! Credential store shared by every clone of an [`AuthClient`].
//!
//! [`AuthClient`]: crate::AuthClient

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::header::HeaderValue;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::debug;

use super::tokens::AccessToken;

/// Holds the current bearer token.
///
/// Sessions are cheap to clone (they use internal `Arc`); all clones see the
/// same credential, so a token installed from one call site is applied to
/// requests issued from every other.
///
/// # Example
///
/// ```
/// use authgate::{AccessToken, Session};
///
/// # async fn example() {
/// let session = Session::new();
/// let other_call_site = session.clone();
/// session.set_credential(AccessToken::new("T1").unwrap()).await;
/// assert!(other_call_site.has_credential().await);
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Default)]
struct SessionInner {
    state: RwLock<SessionState>,
    refresh_gate: Mutex<()>,
}

#[derive(Default)]
struct SessionState {
    access_token: Option<AccessToken>,
    generation: u64,
    updated_at: Option<DateTime<Utc>>,
}

/// Authorization header paired with the generation it was read at.
pub(crate) struct Authorization {
    pub header: Option<HeaderValue>,
    pub generation: u64,
}

impl Session {
    /// Create an empty session with no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new bearer token, replacing any previous one.
    ///
    /// Returns the new generation number.
    pub async fn set_credential(&self, token: AccessToken) -> u64 {
        let mut state = self.inner.state.write().await;
        state.access_token = Some(token);
        state.generation += 1;
        state.updated_at = Some(Utc::now());
        debug!(generation = state.generation, "Credential installed");
        state.generation
    }

    /// Returns true if a bearer token has been installed.
    pub async fn has_credential(&self) -> bool {
        self.inner.state.read().await.access_token.is_some()
    }

    /// Number of times a credential has been installed.
    pub async fn generation(&self) -> u64 {
        self.inner.state.read().await.generation
    }

    /// When the current credential was installed.
    pub async fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.inner.state.read().await.updated_at
    }

    /// Export the current access token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the account.
    pub async fn export_access_token(&self) -> Option<String> {
        let state = self.inner.state.read().await;
        state.access_token.as_ref().map(|t| t.as_str().to_string())
    }

    /// Snapshot the header to send and the generation it belongs to.
    pub(crate) async fn authorization(&self) -> Authorization {
        let state = self.inner.state.read().await;
        Authorization {
            header: state.access_token.as_ref().map(|t| t.bearer_header().clone()),
            generation: state.generation,
        }
    }

    /// Serializes refreshes so concurrent 401s trigger one refresh.
    pub(crate) async fn lock_refresh(&self) -> MutexGuard<'_, ()> {
        self.inner.refresh_gate.lock().await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_session_has_no_header() {
        let session = Session::new();
        assert!(!session.has_credential().await);
        let auth = session.authorization().await;
        assert!(auth.header.is_none());
        assert_eq!(auth.generation, 0);
    }

    #[tokio::test]
    async fn credential_is_shared_between_clones() {
        let session = Session::new();
        let other = session.clone();

        assert_eq!(session.set_credential(AccessToken::new("T1").unwrap()).await, 1);
        assert_eq!(other.set_credential(AccessToken::new("T2").unwrap()).await, 2);

        let auth = session.authorization().await;
        assert_eq!(auth.header.unwrap().to_str().unwrap(), "Bearer T2");
        assert_eq!(auth.generation, 2);
        assert!(session.updated_at().await.is_some());
    }

    #[tokio::test]
    async fn debug_does_not_leak_token() {
        let session = Session::new();
        session.set_credential(AccessToken::new("secret-token").unwrap()).await;
        assert!(!format!("{:?}", session).contains("secret-token"));
    }
}
