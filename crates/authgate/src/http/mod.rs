//! HTTP layer.
//!
//! Request descriptors, endpoint definitions, and the single-attempt client
//! the retry logic is built on.

mod client;
pub mod endpoints;
mod request;

pub(crate) use client::HttpClient;
pub use request::RequestDescriptor;
