//! authgate - Authenticated HTTP client
//!
//! A client for a token-based authentication service. Log in or register to
//! obtain a bearer token; every later request carries it. When a protected
//! request is rejected with 401 or 403, the client exchanges its session
//! cookie for a new token and reissues the request exactly once.
//!
//! # Example
//!
//! ```no_run
//! use authgate::{ApiUrl, AuthClient, Credentials};
//!
//! # async fn example() -> Result<(), authgate::Error> {
//! let api = ApiUrl::new("http://localhost:8080/api/v1")?;
//! let client = AuthClient::new(api)?;
//!
//! client.authenticate(&Credentials::new("a@b.com", "x")).await?;
//! let hello = client.fetch_demo().await?;
//! println!("{}", hello);
//!
//! client.logout().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod proxy;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, Credentials, NoopObserver, Registration, Session, SessionObserver};
pub use client::AuthClient;
pub use config::ClientConfig;
pub use error::Error;
pub use http::RequestDescriptor;
pub use proxy::ProxyRule;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
