//! Authentication service endpoints and wire types.

use serde::Deserialize;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST, `{email, password}` → `{access_token}`
pub const AUTHENTICATE: &str = "/auth/authenticate";

/// POST, `{firstname, lastname, email, password}` → `{access_token}`
pub const REGISTER: &str = "/auth/register";

/// POST, empty body, session cookie → `{access_token}`
pub const REFRESH_TOKEN: &str = "/auth/refresh-token";

/// GET, session cookie and bearer token
pub const LOGOUT: &str = "/auth/logout";

/// GET, bearer token → opaque body
pub const DEMO_RESOURCE: &str = "/demo-controller";

// ============================================================================
// Response Types
// ============================================================================

/// Body returned by authenticate, register, and refresh.
///
/// The refresh token travels in the `refresh-token` cookie; the body field
/// is accepted but not used.
#[derive(Debug, Deserialize)]
pub struct AuthenticationResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl AuthenticationResponse {
    /// The access token, if present and non-empty.
    pub fn into_access_token(self) -> Option<String> {
        self.access_token.filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_access_token() {
        let body: AuthenticationResponse =
            serde_json::from_str(r#"{"access_token":"T1"}"#).unwrap();
        assert_eq!(body.into_access_token().as_deref(), Some("T1"));
    }

    #[test]
    fn empty_or_missing_token_is_none() {
        let body: AuthenticationResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.into_access_token().is_none());

        let body: AuthenticationResponse =
            serde_json::from_str(r#"{"access_token":""}"#).unwrap();
        assert!(body.into_access_token().is_none());
    }
}
