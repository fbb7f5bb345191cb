//! Order Model

use super::food::{ExtraId, FoodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Add-on line inside an order, with the quantity chosen on screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderExtra {
    pub id: ExtraId,
    pub name: String,
    /// Unit price in currency unit
    pub value: Decimal,
    pub quantity: u32,
}

/// Order payload posted to `/orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub product_id: FoodId,
    pub name: String,
    pub description: String,
    /// Order total (base price * quantity + extras)
    pub price: Decimal,
    pub category: String,
    pub thumbnail_url: String,
    pub extras: Vec<OrderExtra>,
}

impl OrderPayload {
    /// Extras that were actually ordered
    pub fn ordered_extras(&self) -> impl Iterator<Item = &OrderExtra> {
        self.extras.iter().filter(|e| e.quantity > 0)
    }
}

/// Order as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub id: i64,
    #[serde(flatten)]
    pub order: OrderPayload,
}
