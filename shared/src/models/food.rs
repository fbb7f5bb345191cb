//! Food Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type FoodId = i64;
pub type ExtraId = i64;

/// Optional add-on offered with a food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    pub id: ExtraId,
    pub name: String,
    /// Unit price in currency unit
    pub value: Decimal,
}

/// Menu item entity as served by `GET /foods/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub name: String,
    pub description: String,
    /// Price in currency unit
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub thumbnail_url: String,
    /// Add-ons in display order
    #[serde(default)]
    pub extras: Vec<Extra>,
}

impl Food {
    /// Snapshot of the core fields stored in the favorites collection
    pub fn favorite_snapshot(&self) -> FavoriteFood {
        FavoriteFood {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category.clone(),
            image_url: self.image_url.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
        }
    }

    pub fn extra(&self, id: ExtraId) -> Option<&Extra> {
        self.extras.iter().find(|e| e.id == id)
    }
}

/// Favorites collection entry (`/favorites`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteFood {
    pub id: FoodId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub thumbnail_url: String,
}
