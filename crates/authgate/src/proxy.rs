//! Development reverse-proxy rule.
//!
//! Requests whose path falls under a prefix (default `/api`) are sent to a
//! fixed upstream instead of the configured base URL. The path is kept
//! verbatim and the `Origin` header is rewritten to the upstream's origin.

use crate::error::{Error, InvalidInputError};
use crate::types::ApiUrl;

/// Prefix forwarded when no other is configured.
pub const DEFAULT_PREFIX: &str = "/api";

/// Forwards a path prefix to a fixed upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    prefix: String,
    target: ApiUrl,
}

/// Where a proxied request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forwarded {
    /// Absolute URL on the upstream.
    pub url: String,
    /// Value for the rewritten `Origin` header.
    pub origin: String,
}

impl ProxyRule {
    /// Create a rule forwarding `prefix` to `target`.
    ///
    /// # Errors
    ///
    /// The prefix must start with `/` and name at least one segment.
    pub fn new(prefix: impl Into<String>, target: ApiUrl) -> Result<Self, Error> {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        if !trimmed.starts_with('/') || trimmed.len() < 2 {
            return Err(InvalidInputError::ProxyRule {
                value: prefix,
                reason: "prefix must start with '/' and name a path segment".to_string(),
            }
            .into());
        }

        Ok(Self {
            prefix: trimmed.to_string(),
            target,
        })
    }

    /// Rule forwarding [`DEFAULT_PREFIX`] to `target`.
    pub fn api(target: ApiUrl) -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            target,
        }
    }

    /// The forwarded prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The upstream requests are forwarded to.
    pub fn target(&self) -> &ApiUrl {
        &self.target
    }

    /// Returns true if `path` falls under the prefix on a segment boundary.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(&self.prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }

    /// Rewrite `path` onto the upstream, or `None` if the rule does not apply.
    pub fn forward(&self, path: &str) -> Option<Forwarded> {
        if !self.matches(path) {
            return None;
        }

        Some(Forwarded {
            url: self.target.endpoint_url(path),
            origin: self.target.origin(),
        })
    }
}
