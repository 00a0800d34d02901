//! Authentication types and the credential store.
//!
//! Every authenticated request reads its bearer token from a [`Session`].

mod credentials;
mod observer;
mod session;
mod tokens;

pub use credentials::{Credentials, Registration};
pub use observer::{NoopObserver, SessionObserver};
pub use session::Session;
pub use tokens::AccessToken;
