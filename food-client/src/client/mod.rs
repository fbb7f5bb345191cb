//! HTTP transports for the food API.
//!
//! `NetworkHttpClient` talks to a remote server over reqwest;
//! `OneshotHttpClient` calls an in-process axum `Router` directly.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
