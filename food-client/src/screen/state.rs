//! Screen state for one mounted food
//!
//! Pure data plus the editor operations. Nothing here touches the network;
//! [`FoodDetailsScreen`](super::FoodDetailsScreen) owns an instance behind a
//! lock and feeds it loader results.

use crate::error::FailureKind;
use serde::Serialize;
use shared::{CurrencyFormat, Decimal, ExtraId, Food, FoodId, OrderExtra, OrderPayload, cart_total};

/// Progress of one loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Pending,
    Ready,
    Failed(LoadFailure),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Network-backed operation a notice refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    LoadFood,
    LoadFavorite,
    ToggleFavorite,
    PlaceOrder,
}

/// Non-blocking error message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub operation: Operation,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenPhase {
    Loading,
    LoadFailed,
    Loaded,
    Submitting,
    Submitted,
}

/// Mutable state of a mounted screen
#[derive(Debug, Clone)]
pub struct FoodDetailsState {
    food_id: FoodId,
    food: Option<Food>,
    extras: Vec<OrderExtra>,
    quantity: u32,
    is_favorite: bool,
    food_status: LoadStatus,
    favorite_status: LoadStatus,
    favorite_pending: bool,
    order_status: OrderStatus,
    notices: Vec<Notice>,
    max_quantity: u32,
}

impl FoodDetailsState {
    pub fn new(food_id: FoodId, max_quantity: u32) -> Self {
        Self {
            food_id,
            food: None,
            extras: Vec::new(),
            quantity: 1,
            is_favorite: false,
            food_status: LoadStatus::Pending,
            favorite_status: LoadStatus::Pending,
            favorite_pending: false,
            order_status: OrderStatus::Idle,
            notices: Vec::new(),
            max_quantity: max_quantity.max(1),
        }
    }

    // ========== Loader results ==========

    /// Install the fetched food; every extra starts at quantity 0
    pub fn apply_food(&mut self, food: Food) {
        self.extras = food
            .extras
            .iter()
            .map(|extra| OrderExtra {
                id: extra.id,
                name: extra.name.clone(),
                value: extra.value,
                quantity: 0,
            })
            .collect();
        self.food = Some(food);
        self.food_status = LoadStatus::Ready;
    }

    pub fn apply_favorite(&mut self, is_favorite: bool) {
        self.is_favorite = is_favorite;
        self.favorite_status = LoadStatus::Ready;
    }

    pub fn fail_food(&mut self, failure: LoadFailure) {
        self.push_notice(Operation::LoadFood, failure.kind, failure.message.clone());
        self.food_status = LoadStatus::Failed(failure);
    }

    pub fn fail_favorite(&mut self, failure: LoadFailure) {
        self.push_notice(Operation::LoadFavorite, failure.kind, failure.message.clone());
        self.favorite_status = LoadStatus::Failed(failure);
    }

    /// Put failed loaders back to pending, returning which ones need a rerun
    pub fn reset_failed_loads(&mut self) -> (bool, bool) {
        let food = matches!(self.food_status, LoadStatus::Failed(_));
        let favorite = matches!(self.favorite_status, LoadStatus::Failed(_));
        if food {
            self.food_status = LoadStatus::Pending;
        }
        if favorite {
            self.favorite_status = LoadStatus::Pending;
        }
        (food, favorite)
    }

    // ========== Editor ==========

    /// Returns `true` if the quantity changed
    pub fn increment_extra(&mut self, id: ExtraId) -> bool {
        let max = self.max_quantity;
        match self.extras.iter_mut().find(|e| e.id == id) {
            Some(extra) if extra.quantity < max => {
                extra.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if the quantity changed; 0 is the floor
    pub fn decrement_extra(&mut self, id: ExtraId) -> bool {
        match self.extras.iter_mut().find(|e| e.id == id) {
            Some(extra) if extra.quantity > 0 => {
                extra.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn increment_food(&mut self) -> bool {
        if self.quantity < self.max_quantity {
            self.quantity += 1;
            true
        } else {
            false
        }
    }

    /// 1 is the floor
    pub fn decrement_food(&mut self) -> bool {
        if self.quantity > 1 {
            self.quantity -= 1;
            true
        } else {
            false
        }
    }

    pub fn set_favorite(&mut self, is_favorite: bool) {
        self.is_favorite = is_favorite;
    }

    pub fn set_favorite_pending(&mut self, pending: bool) {
        self.favorite_pending = pending;
    }

    pub fn set_order_status(&mut self, status: OrderStatus) {
        self.order_status = status;
    }

    pub fn push_notice(&mut self, operation: Operation, kind: FailureKind, message: String) {
        self.notices.push(Notice {
            operation,
            kind,
            message,
        });
    }

    /// Drain notices once the host has shown them
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ========== Derived ==========

    /// `price * quantity + Σ(value * quantity)`, zero until the food is loaded
    pub fn total(&self) -> Decimal {
        let price = self.food.as_ref().map(|f| f.price).unwrap_or_default();
        cart_total(
            price,
            self.quantity,
            self.extras.iter().map(|e| (e.value, e.quantity)),
        )
    }

    pub fn phase(&self) -> ScreenPhase {
        match self.order_status {
            OrderStatus::Submitted => return ScreenPhase::Submitted,
            OrderStatus::Submitting => return ScreenPhase::Submitting,
            OrderStatus::Idle => {}
        }
        match (&self.food_status, &self.favorite_status) {
            (LoadStatus::Failed(_), _) | (_, LoadStatus::Failed(_)) => ScreenPhase::LoadFailed,
            (LoadStatus::Ready, LoadStatus::Ready) => ScreenPhase::Loaded,
            _ => ScreenPhase::Loading,
        }
    }

    /// Order payload built from the current selection
    ///
    /// `None` until the food is loaded. Zero-quantity extras are carried
    /// unless `omit_zero_quantity_extras` is set.
    pub fn order_payload(&self, omit_zero_quantity_extras: bool) -> Option<OrderPayload> {
        let food = self.food.as_ref()?;
        let extras = self
            .extras
            .iter()
            .filter(|e| !omit_zero_quantity_extras || e.quantity > 0)
            .cloned()
            .collect();

        Some(OrderPayload {
            product_id: food.id,
            name: food.name.clone(),
            description: food.description.clone(),
            price: self.total(),
            category: food.category.clone(),
            thumbnail_url: food.thumbnail_url.clone(),
            extras,
        })
    }

    pub fn view(&self, currency: &CurrencyFormat) -> FoodDetailsView {
        let total = self.total();
        FoodDetailsView {
            food_id: self.food_id,
            formatted_price: self.food.as_ref().map(|f| currency.format(f.price)),
            food: self.food.clone(),
            extras: self.extras.clone(),
            quantity: self.quantity,
            is_favorite: self.is_favorite,
            favorite_pending: self.favorite_pending,
            total,
            formatted_total: currency.format(total),
            phase: self.phase(),
            food_status: self.food_status.clone(),
            favorite_status: self.favorite_status.clone(),
            notices: self.notices.clone(),
        }
    }

    // ========== Accessors ==========

    pub fn food_id(&self) -> FoodId {
        self.food_id
    }

    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    pub fn extras(&self) -> &[OrderExtra] {
        &self.extras
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn favorite_pending(&self) -> bool {
        self.favorite_pending
    }

    pub fn order_status(&self) -> OrderStatus {
        self.order_status
    }

    pub fn food_status(&self) -> &LoadStatus {
        &self.food_status
    }

    pub fn favorite_status(&self) -> &LoadStatus {
        &self.favorite_status
    }
}

/// Read-only snapshot handed to the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodDetailsView {
    pub food_id: FoodId,
    pub food: Option<Food>,
    pub formatted_price: Option<String>,
    pub extras: Vec<OrderExtra>,
    pub quantity: u32,
    pub is_favorite: bool,
    pub favorite_pending: bool,
    pub total: Decimal,
    pub formatted_total: String,
    pub phase: ScreenPhase,
    pub food_status: LoadStatus,
    pub favorite_status: LoadStatus,
    pub notices: Vec<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Extra;

    fn food(price: Decimal, extras: Vec<(ExtraId, Decimal)>) -> Food {
        Food {
            id: 42,
            name: "Ao molho".to_string(),
            description: "Macarrão ao molho branco".to_string(),
            price,
            category: "pasta".to_string(),
            image_url: "img".to_string(),
            thumbnail_url: "thumb".to_string(),
            extras: extras
                .into_iter()
                .map(|(id, value)| Extra {
                    id,
                    name: format!("extra-{id}"),
                    value,
                })
                .collect(),
        }
    }

    fn loaded_state() -> FoodDetailsState {
        let mut state = FoodDetailsState::new(42, 9999);
        state.apply_food(food(
            Decimal::new(1000, 2),
            vec![(1, Decimal::new(200, 2)), (2, Decimal::new(150, 2))],
        ));
        state
    }

    #[test]
    fn test_apply_food_resets_extra_quantities() {
        let state = loaded_state();
        assert_eq!(state.extras().len(), 2);
        assert!(state.extras().iter().all(|e| e.quantity == 0));
        assert_eq!(state.quantity(), 1);
        assert_eq!(state.food_status(), &LoadStatus::Ready);
    }

    #[test]
    fn test_increment_then_decrement_restores_extra() {
        let mut state = loaded_state();
        state.increment_extra(2);
        let before = state.extras().to_vec();

        assert!(state.increment_extra(1));
        assert!(state.decrement_extra(1));
        assert_eq!(state.extras(), before.as_slice());
    }

    #[test]
    fn test_decrement_extra_at_zero_is_noop() {
        let mut state = loaded_state();
        let before = state.extras().to_vec();
        assert!(!state.decrement_extra(1));
        assert!(!state.decrement_extra(1));
        assert_eq!(state.extras(), before.as_slice());
    }

    #[test]
    fn test_unknown_extra_is_noop() {
        let mut state = loaded_state();
        assert!(!state.increment_extra(99));
        assert!(!state.decrement_extra(99));
    }

    #[test]
    fn test_decrement_food_floor() {
        let mut state = loaded_state();
        assert!(!state.decrement_food());
        assert_eq!(state.quantity(), 1);

        state.increment_food();
        state.increment_food();
        assert!(state.decrement_food());
        assert_eq!(state.quantity(), 2);
    }

    #[test]
    fn test_quantity_cap() {
        let mut state = FoodDetailsState::new(42, 2);
        state.apply_food(food(Decimal::ONE, vec![(1, Decimal::ONE)]));

        assert!(state.increment_food());
        assert!(!state.increment_food());
        assert_eq!(state.quantity(), 2);

        assert!(state.increment_extra(1));
        assert!(state.increment_extra(1));
        assert!(!state.increment_extra(1));
        assert_eq!(state.extras()[0].quantity, 2);
    }

    #[test]
    fn test_total_matches_formula() {
        let mut state = loaded_state();
        state.increment_food();
        for _ in 0..3 {
            state.increment_extra(1);
        }
        state.increment_extra(2);

        // 10.00 * 2 + (2.00 * 3 + 1.50 * 1)
        assert_eq!(state.total(), Decimal::new(2750, 2));
        let view = state.view(&CurrencyFormat::brl());
        assert_eq!(view.formatted_total, "R$ 27,50");
        assert_eq!(view.formatted_price.as_deref(), Some("R$ 10,00"));
    }

    #[test]
    fn test_total_before_load_is_zero() {
        let state = FoodDetailsState::new(1, 10);
        assert_eq!(state.total(), Decimal::ZERO);
        assert!(state.order_payload(false).is_none());
    }

    #[test]
    fn test_order_payload_keeps_zero_extras_by_default() {
        let mut state = loaded_state();
        state.increment_extra(1);

        let payload = state.order_payload(false).unwrap();
        assert_eq!(payload.product_id, 42);
        assert_eq!(payload.price, state.total());
        assert_eq!(payload.extras.len(), 2);
        assert_eq!(payload.extras[1].quantity, 0);

        let payload = state.order_payload(true).unwrap();
        assert_eq!(payload.extras.len(), 1);
        assert_eq!(payload.extras[0].id, 1);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = FoodDetailsState::new(42, 10);
        assert_eq!(state.phase(), ScreenPhase::Loading);

        state.apply_favorite(true);
        assert_eq!(state.phase(), ScreenPhase::Loading);

        state.fail_food(LoadFailure {
            kind: FailureKind::Transient,
            message: "timeout".to_string(),
        });
        assert_eq!(state.phase(), ScreenPhase::LoadFailed);
        assert_eq!(state.view(&CurrencyFormat::brl()).notices.len(), 1);

        assert_eq!(state.reset_failed_loads(), (true, false));
        assert_eq!(state.phase(), ScreenPhase::Loading);

        state.apply_food(food(Decimal::ONE, vec![]));
        assert_eq!(state.phase(), ScreenPhase::Loaded);

        state.set_order_status(OrderStatus::Submitting);
        assert_eq!(state.phase(), ScreenPhase::Submitting);
        state.set_order_status(OrderStatus::Submitted);
        assert_eq!(state.phase(), ScreenPhase::Submitted);
    }

    #[test]
    fn test_take_notices_drains() {
        let mut state = loaded_state();
        state.push_notice(Operation::PlaceOrder, FailureKind::Server, "boom".into());
        assert_eq!(state.take_notices().len(), 1);
        assert!(state.take_notices().is_empty());
    }
}
