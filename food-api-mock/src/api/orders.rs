use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, Endpoint};
use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::{OrderPayload, PlacedOrder};
use std::sync::Arc;

pub async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<PlacedOrder>> {
    state.enter(Endpoint::ListOrders, "/orders".into()).await?;
    Ok(Json(state.orders().await))
}

pub async fn place_order(
    State(state): State<Arc<AppState>>,
    Json(order): Json<OrderPayload>,
) -> Result<(StatusCode, Json<PlacedOrder>), ApiError> {
    state.enter(Endpoint::PlaceOrder, "/orders".into()).await?;
    let placed = state.place_order(order).await;
    tracing::info!(
        order_id = placed.id,
        product_id = placed.order.product_id,
        extras = placed.order.extras.len(),
        "Order placed"
    );
    Ok((StatusCode::CREATED, Json(placed)))
}
