//! food-api-mock - in-memory food API backend
//!
//! Serves foods, favorites and orders over the same routes the client uses.
//! The state records every call and can be told to fail or stall specific
//! endpoints, which is how the client's screen flows are tested.

pub mod api;
pub mod config;
pub mod error;
pub mod seed;
pub mod state;

pub use api::router;
pub use error::ApiError;
pub use seed::Seed;
pub use state::{ApiCall, AppState, Endpoint};
