//! In-memory store shared by the handlers
//!
//! Besides the data, the state keeps a journal of every request it served
//! and lets callers queue failures or delays per endpoint.

use crate::error::ApiError;
use crate::seed::Seed;
use http::StatusCode;
use serde::Serialize;
use shared::{FavoriteFood, Food, FoodId, OrderPayload, PlacedOrder};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Routes served by the mock, used as journal and fault keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    ListFoods,
    GetFood,
    ListFavorites,
    GetFavorite,
    AddFavorite,
    RemoveFavorite,
    ListOrders,
    PlaceOrder,
}

/// One served request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiCall {
    pub endpoint: Endpoint,
    pub path: String,
}

pub struct AppState {
    foods: RwLock<Vec<Food>>,
    favorites: RwLock<Vec<FavoriteFood>>,
    orders: RwLock<Vec<PlacedOrder>>,
    journal: Mutex<Vec<ApiCall>>,
    faults: Mutex<HashMap<Endpoint, VecDeque<StatusCode>>>,
    delays: Mutex<HashMap<Endpoint, Duration>>,
}

impl AppState {
    pub fn new(seed: Seed) -> Self {
        Self {
            foods: RwLock::new(seed.foods),
            favorites: RwLock::new(seed.favorites),
            orders: RwLock::new(Vec::new()),
            journal: Mutex::new(Vec::new()),
            faults: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
        }
    }

    // ========== Request bookkeeping ==========

    /// Record the call, apply any configured delay, then pop a queued failure
    pub(crate) async fn enter(&self, endpoint: Endpoint, path: String) -> Result<(), ApiError> {
        self.journal.lock().await.push(ApiCall { endpoint, path });

        let delay = self.delays.lock().await.get(&endpoint).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let fault = self
            .faults
            .lock()
            .await
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);
        match fault {
            Some(status) => Err(ApiError::Injected(status)),
            None => Ok(()),
        }
    }

    /// Make the next call to `endpoint` fail with `status`; calls queue up
    pub async fn fail_next(&self, endpoint: Endpoint, status: StatusCode) {
        self.faults
            .lock()
            .await
            .entry(endpoint)
            .or_default()
            .push_back(status);
    }

    /// Delay every call to `endpoint` before answering
    pub async fn set_delay(&self, endpoint: Endpoint, delay: Duration) {
        self.delays.lock().await.insert(endpoint, delay);
    }

    pub async fn journal(&self) -> Vec<ApiCall> {
        self.journal.lock().await.clone()
    }

    /// Journal entries for the given endpoints, in arrival order
    pub async fn calls_to(&self, endpoints: &[Endpoint]) -> Vec<ApiCall> {
        self.journal
            .lock()
            .await
            .iter()
            .filter(|c| endpoints.contains(&c.endpoint))
            .cloned()
            .collect()
    }

    // ========== Foods ==========

    pub async fn foods(&self) -> Vec<Food> {
        self.foods.read().await.clone()
    }

    pub async fn food(&self, id: FoodId) -> Option<Food> {
        self.foods.read().await.iter().find(|f| f.id == id).cloned()
    }

    // ========== Favorites ==========

    pub async fn favorites(&self) -> Vec<FavoriteFood> {
        self.favorites.read().await.clone()
    }

    pub async fn favorite(&self, id: FoodId) -> Option<FavoriteFood> {
        self.favorites.read().await.iter().find(|f| f.id == id).cloned()
    }

    pub async fn add_favorite(&self, favorite: FavoriteFood) -> Result<FavoriteFood, ApiError> {
        let mut favorites = self.favorites.write().await;
        if favorites.iter().any(|f| f.id == favorite.id) {
            return Err(ApiError::Conflict(format!("favorite {}", favorite.id)));
        }
        favorites.push(favorite.clone());
        Ok(favorite)
    }

    pub async fn remove_favorite(&self, id: FoodId) -> Result<(), ApiError> {
        let mut favorites = self.favorites.write().await;
        let before = favorites.len();
        favorites.retain(|f| f.id != id);
        if favorites.len() == before {
            return Err(ApiError::NotFound(format!("favorite {}", id)));
        }
        Ok(())
    }

    // ========== Orders ==========

    pub async fn orders(&self) -> Vec<PlacedOrder> {
        self.orders.read().await.clone()
    }

    pub async fn place_order(&self, order: OrderPayload) -> PlacedOrder {
        let mut orders = self.orders.write().await;
        let placed = PlacedOrder {
            id: orders.len() as i64 + 1,
            order,
        };
        orders.push(placed.clone());
        placed
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Seed::demo())
    }
}
