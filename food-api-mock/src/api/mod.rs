mod favorites;
mod foods;
mod orders;

use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/foods", get(foods::list_foods))
        .route("/foods/{id}", get(foods::get_food))
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route(
            "/favorites/{id}",
            get(favorites::get_favorite).delete(favorites::remove_favorite),
        )
        .route("/orders", get(orders::list_orders).post(orders::place_order))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
