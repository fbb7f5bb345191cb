use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, Endpoint};
use axum::Json;
use axum::extract::{Path, State};
use shared::{Food, FoodId};
use std::sync::Arc;

pub async fn list_foods(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Food>> {
    state.enter(Endpoint::ListFoods, "/foods".into()).await?;
    Ok(Json(state.foods().await))
}

pub async fn get_food(
    State(state): State<Arc<AppState>>,
    Path(id): Path<FoodId>,
) -> ApiResult<Food> {
    state.enter(Endpoint::GetFood, format!("/foods/{id}")).await?;
    state
        .food(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("food {id}")))
}
