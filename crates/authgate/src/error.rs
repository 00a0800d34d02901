//! Error types for the authgate library.
//!
//! A single [`Error`] type with explicit variants for transport,
//! authentication, protocol, and input validation failures. Only the
//! 401/403 case is recovered inside the client; everything else reaches
//! the caller through these variants unchanged.

use std::fmt;
use thiserror::Error;

/// The unified error type for authgate operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected login, failed refresh).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-2xx responses, undecodable bodies).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (bad URLs, unusable header values).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this error is an expired or rejected authorization
    /// (HTTP 401 or 403).
    pub fn is_authorization_expired(&self) -> bool {
        matches!(self, Error::Protocol(e) if e.is_auth_error())
    }

    /// Returns true if this error means the session is gone and the user
    /// has to log in again.
    pub fn is_refresh_failed(&self) -> bool {
        matches!(self, Error::Auth(AuthError::RefreshFailed { .. }))
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Protocol(e) => Some(e.status),
            Error::Auth(AuthError::AuthenticationFailed { status })
            | Error::Auth(AuthError::RegistrationFailed { status }) => Some(*status),
            Error::Auth(AuthError::RefreshFailed { status, .. }) => *status,
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Response body could not be read or decoded.
    #[error("failed to decode response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The service rejected the login form.
    #[error("authentication failed (HTTP {status})")]
    AuthenticationFailed { status: u16 },

    /// The service rejected the registration form.
    #[error("registration failed (HTTP {status})")]
    RegistrationFailed { status: u16 },

    /// A 2xx login or registration response carried no usable access token.
    #[error("response did not contain an access token")]
    MissingAccessToken,

    /// The session could not be refreshed; the user must log in again.
    #[error("session refresh failed: {reason}")]
    RefreshFailed { status: Option<u16>, reason: String },
}

impl AuthError {
    pub(crate) fn refresh_failed(status: Option<u16>, reason: impl Into<String>) -> Self {
        AuthError::RefreshFailed {
            status,
            reason: reason.into(),
        }
    }
}

/// A non-2xx response from the service.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Response body, if it could be read and was not empty.
    pub body: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref body) = self.body {
            write!(f, ": {}", body)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, body: Option<String>) -> Self {
        Self { status, body }
    }

    /// Check if this is an authorization failure that the refresh-retry
    /// cycle can recover from.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid proxy rule.
    #[error("invalid proxy rule '{value}': {reason}")]
    ProxyRule { value: String, reason: String },

    /// Token contains characters that cannot go into a header.
    #[error("access token is empty or not a valid header value")]
    Token,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
