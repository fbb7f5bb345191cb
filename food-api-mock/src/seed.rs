//! Seed data for the in-memory store
//!
//! A seed file has the same shape as the demo data:
//! `{ "foods": [...], "favorites": [...] }`.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use shared::{Decimal, Extra, FavoriteFood, Food};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub foods: Vec<Food>,
    #[serde(default)]
    pub favorites: Vec<FavoriteFood>,
}

impl Seed {
    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Seed(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw).map_err(|e| ApiError::Seed(format!("{}: {}", path.display(), e)))
    }

    /// Built-in menu used when no seed file is configured
    pub fn demo() -> Self {
        let extras = || {
            vec![
                extra(1, "Bacon", 150),
                extra(2, "Frango", 200),
                extra(3, "Batata palha", 100),
            ]
        };

        Self {
            foods: vec![
                Food {
                    id: 1,
                    name: "Ao molho".to_string(),
                    description: "Macarrão ao molho branco, fughi e cheiro verde das montanhas."
                        .to_string(),
                    price: Decimal::new(1990, 2),
                    category: "pasta".to_string(),
                    image_url: "https://storage.example.com/foods/ao_molho.png".to_string(),
                    thumbnail_url: "https://storage.example.com/foods/ao_molho_thumb.png"
                        .to_string(),
                    extras: extras(),
                },
                Food {
                    id: 2,
                    name: "Veggie".to_string(),
                    description: "Macarrão com pimentão, ervilha e ervas finas colhidas no himalaia."
                        .to_string(),
                    price: Decimal::new(2190, 2),
                    category: "veggie".to_string(),
                    image_url: "https://storage.example.com/foods/veggie.png".to_string(),
                    thumbnail_url: "https://storage.example.com/foods/veggie_thumb.png".to_string(),
                    extras: vec![extra(4, "Queijo extra", 250)],
                },
                Food {
                    id: 3,
                    name: "A la Camarón".to_string(),
                    description: "Macarrão com vegetais de primeira linha e camarão dos 7 mares."
                        .to_string(),
                    price: Decimal::new(2590, 2),
                    category: "pasta".to_string(),
                    image_url: "https://storage.example.com/foods/camarao.png".to_string(),
                    thumbnail_url: "https://storage.example.com/foods/camarao_thumb.png".to_string(),
                    extras: Vec::new(),
                },
            ],
            favorites: Vec::new(),
        }
    }
}

fn extra(id: i64, name: &str, cents: i64) -> Extra {
    Extra {
        id,
        name: name.to_string(),
        value: Decimal::new(cents, 2),
    }
}
