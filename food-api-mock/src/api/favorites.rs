use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, Endpoint};
use axum::Json;
use axum::extract::{Path, State};
use http::StatusCode;
use shared::{FavoriteFood, FoodId};
use std::sync::Arc;

pub async fn list_favorites(State(state): State<Arc<AppState>>) -> ApiResult<Vec<FavoriteFood>> {
    state.enter(Endpoint::ListFavorites, "/favorites".into()).await?;
    Ok(Json(state.favorites().await))
}

pub async fn get_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<FoodId>,
) -> ApiResult<FavoriteFood> {
    state
        .enter(Endpoint::GetFavorite, format!("/favorites/{id}"))
        .await?;
    state
        .favorite(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("favorite {id}")))
}

pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Json(favorite): Json<FavoriteFood>,
) -> Result<(StatusCode, Json<FavoriteFood>), ApiError> {
    state.enter(Endpoint::AddFavorite, "/favorites".into()).await?;
    let saved = state.add_favorite(favorite).await?;
    tracing::info!(food_id = saved.id, "Favorite added");
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<FoodId>,
) -> Result<StatusCode, ApiError> {
    state
        .enter(Endpoint::RemoveFavorite, format!("/favorites/{id}"))
        .await?;
    state.remove_favorite(id).await?;
    tracing::info!(food_id = id, "Favorite removed");
    Ok(StatusCode::NO_CONTENT)
}
