//! Client configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{NoopObserver, SessionObserver};
use crate::proxy::ProxyRule;
use crate::types::ApiUrl;

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("authgate/", env!("CARGO_PKG_VERSION"));

/// Settings for an [`AuthClient`].
///
/// No request timeout is applied unless one is set; a hung request then
/// stays pending.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use authgate::{ApiUrl, ClientConfig, ProxyRule};
///
/// let base = ApiUrl::new("http://localhost:3000").unwrap();
/// let upstream = ApiUrl::new("http://localhost:9000").unwrap();
/// let config = ClientConfig::new(base)
///     .with_proxy(ProxyRule::api(upstream))
///     .with_timeout(Duration::from_secs(10));
/// assert!(config.proxy().is_some());
/// ```
///
/// [`AuthClient`]: crate::AuthClient
#[derive(Clone)]
pub struct ClientConfig {
    base: ApiUrl,
    proxy: Option<ProxyRule>,
    user_agent: String,
    timeout: Option<Duration>,
    observer: Arc<dyn SessionObserver>,
}

impl ClientConfig {
    /// Configuration for the service at `base` with defaults elsewhere.
    pub fn new(base: ApiUrl) -> Self {
        Self {
            base,
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Forward matching paths to a fixed upstream.
    pub fn with_proxy(mut self, rule: ProxyRule) -> Self {
        self.proxy = Some(rule);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Apply a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Notify `observer` when the session cannot be refreshed.
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    pub fn proxy(&self) -> Option<&ProxyRule> {
        self.proxy.as_ref()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn observer(&self) -> Arc<dyn SessionObserver> {
        Arc::clone(&self.observer)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base", &self.base)
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
