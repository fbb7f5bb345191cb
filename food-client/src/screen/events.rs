//! Events published by a mounted screen

use super::state::{Notice, Operation};
use crate::error::FailureKind;
use shared::{Decimal, FoodId};

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    FoodLoaded {
        food_id: FoodId,
    },
    FavoriteResolved {
        food_id: FoodId,
        is_favorite: bool,
    },
    LoadFailed {
        food_id: FoodId,
        operation: Operation,
        kind: FailureKind,
    },
    /// Favorite flag confirmed by the server
    FavoriteChanged {
        food_id: FoodId,
        is_favorite: bool,
    },
    QuantitiesChanged {
        food_id: FoodId,
        total: Decimal,
    },
    Notice(Notice),
    OrderPlaced {
        food_id: FoodId,
        total: Decimal,
    },
}
