//! Typed calls against the food API

use crate::client::HttpClient;
use crate::error::{ClientError, ClientResult};
use serde::de::IgnoredAny;
use shared::{FavoriteFood, Food, FoodId, OrderPayload, PlacedOrder};
use std::sync::Arc;

/// Food API endpoints on top of any [`HttpClient`]
#[derive(Debug)]
pub struct FoodApi<C> {
    http: Arc<C>,
}

impl<C> Clone for FoodApi<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
        }
    }
}

impl<C: HttpClient> FoodApi<C> {
    pub fn new(http: C) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// `GET /foods/{id}`
    pub async fn get_food(&self, id: FoodId) -> ClientResult<Food> {
        self.http.get(&format!("/foods/{}", id)).await
    }

    /// `GET /favorites`
    pub async fn list_favorites(&self) -> ClientResult<Vec<FavoriteFood>> {
        self.http.get("/favorites").await
    }

    /// `GET /favorites/{id}`, `None` when the backend answers 404
    pub async fn get_favorite(&self, id: FoodId) -> ClientResult<Option<FavoriteFood>> {
        match self.http.get(&format!("/favorites/{}", id)).await {
            Ok(favorite) => Ok(Some(favorite)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Membership check through the full favorites list
    pub async fn is_favorite(&self, id: FoodId) -> ClientResult<bool> {
        let favorites = self.list_favorites().await?;
        Ok(favorites.iter().any(|f| f.id == id))
    }

    /// `POST /favorites`
    pub async fn add_favorite(&self, favorite: &FavoriteFood) -> ClientResult<()> {
        let _: IgnoredAny = self.http.post("/favorites", favorite).await?;
        Ok(())
    }

    /// `DELETE /favorites/{id}`
    pub async fn remove_favorite(&self, id: FoodId) -> ClientResult<()> {
        let _: IgnoredAny = self.http.delete(&format!("/favorites/{}", id)).await?;
        Ok(())
    }

    /// `POST /orders`
    ///
    /// Any 2xx reply means the order was accepted. The created order is
    /// returned only when the backend echoes one back; an empty body or any
    /// other acknowledgement yields `None`.
    pub async fn place_order(&self, order: &OrderPayload) -> ClientResult<Option<PlacedOrder>> {
        let reply: serde_json::Value = self.http.post("/orders", order).await?;
        if reply.is_null() {
            return Ok(None);
        }
        match serde_json::from_value::<PlacedOrder>(reply) {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                tracing::debug!(error = %e, "Order acknowledged without an order body");
                Ok(None)
            }
        }
    }
}
