//! Bearer token type.

use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::{Error, InvalidInputError};

/// An access token for authenticated requests.
///
/// Access tokens are short-lived JWTs issued by the authentication service
/// and sent as `Authorization: Bearer <token>`. The header value is built
/// when the token is created, so a token that cannot be sent is never
/// installed.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    header: HeaderValue,
}

impl AccessToken {
    /// Create a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Token`] if the token is empty or holds
    /// characters that cannot go into a header.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let value = token.into();
        if value.is_empty() {
            return Err(InvalidInputError::Token.into());
        }

        let mut header = HeaderValue::from_str(&format!("Bearer {}", value))
            .map_err(|_| InvalidInputError::Token)?;
        header.set_sensitive(true);

        Ok(Self { value, header })
    }

    /// Returns the raw token value.
    ///
    /// # Security
    ///
    /// Use only when exporting the token on explicit user request.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The `Authorization` header value for this token.
    pub(crate) fn bearer_header(&self) -> &HeaderValue {
        &self.header
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}
