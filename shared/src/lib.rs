//! Shared types for the food ordering stack
//!
//! Wire models exchanged with the food API and money helpers used
//! to derive and display order totals.

pub mod models;
pub mod money;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use models::{ExtraId, Extra, FavoriteFood, Food, FoodId, OrderExtra, OrderPayload, PlacedOrder};
pub use money::{CurrencyFormat, cart_total, format_value};
