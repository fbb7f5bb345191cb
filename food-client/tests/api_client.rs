//! Typed API calls over the in-process transport

use food_api_mock::{AppState, Endpoint, Seed, router};
use food_client::{ClientError, FailureKind, FoodApi, OneshotHttpClient, OrderPayload};
use http::StatusCode;
use std::sync::Arc;

fn api() -> (Arc<AppState>, FoodApi<OneshotHttpClient>) {
    let backend = Arc::new(AppState::new(Seed::demo()));
    let api = FoodApi::new(OneshotHttpClient::new(router(backend.clone())));
    (backend, api)
}

#[tokio::test]
async fn test_get_food() {
    let (_, api) = api();
    let food = api.get_food(2).await.unwrap();
    assert_eq!(food.name, "Veggie");
    assert_eq!(food.extras.len(), 1);

    let err = api.get_food(404).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(err.kind(), FailureKind::NotFound);
}

#[tokio::test]
async fn test_favorite_calls() {
    let (backend, api) = api();
    let food = api.get_food(1).await.unwrap();

    assert!(!api.is_favorite(1).await.unwrap());
    assert_eq!(api.get_favorite(1).await.unwrap(), None);

    api.add_favorite(&food.favorite_snapshot()).await.unwrap();
    assert!(api.is_favorite(1).await.unwrap());
    assert_eq!(api.get_favorite(1).await.unwrap().unwrap().id, 1);
    assert_eq!(api.list_favorites().await.unwrap().len(), 1);

    // Duplicate add surfaces the conflict
    let err = api.add_favorite(&food.favorite_snapshot()).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 409, .. }));

    api.remove_favorite(1).await.unwrap();
    assert!(backend.favorites().await.is_empty());
}

#[tokio::test]
async fn test_place_order_returns_created_order() {
    let (backend, api) = api();
    let food = api.get_food(3).await.unwrap();
    let payload = OrderPayload {
        product_id: food.id,
        name: food.name.clone(),
        description: food.description.clone(),
        price: food.price,
        category: food.category.clone(),
        thumbnail_url: food.thumbnail_url.clone(),
        extras: Vec::new(),
    };

    let created = api.place_order(&payload).await.unwrap().unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.order, payload);
    assert_eq!(backend.orders().await.len(), 1);
}

#[tokio::test]
async fn test_transient_status() {
    let (backend, api) = api();
    backend
        .fail_next(Endpoint::ListFavorites, StatusCode::TOO_MANY_REQUESTS)
        .await;

    let err = api.is_favorite(1).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.kind(), FailureKind::Transient);
    assert!(api.is_favorite(1).await.is_ok());
}
