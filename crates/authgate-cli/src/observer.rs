//! Session expiry notice.

use authgate::SessionObserver;
use authgate::error::AuthError;

use crate::output;

/// Tells the user to log in again when the session cannot be refreshed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliObserver;

impl SessionObserver for CliObserver {
    fn session_expired(&self, error: &AuthError) {
        tracing::debug!(error = %error, "Session expired");
        output::error("Please log in again");
        eprintln!("Run 'authgate login --email <EMAIL> --password <PASSWORD>' to start a new session.");
    }
}
