//! Data models
//!
//! Shared between food-client and the food API (wire format is JSON).
//! All IDs are `i64`, money is `Decimal` serialized as a JSON number.

pub mod food;
pub mod order;

// Re-exports
pub use food::*;
pub use order::*;
