use axum::body::{Body, to_bytes};
use food_api_mock::{AppState, Endpoint, router};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn call(state: &Arc<AppState>, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_get_food() {
    let state = Arc::new(AppState::default());

    let (status, body) = call(&state, "GET", "/foods/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ao molho");
    assert_eq!(body["price"], json!(19.9));
    assert_eq!(body["extras"].as_array().unwrap().len(), 3);

    let (status, body) = call(&state, "GET", "/foods/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_favorite_lifecycle() {
    let state = Arc::new(AppState::default());
    let favorite = json!({
        "id": 2,
        "name": "Veggie",
        "description": "",
        "price": 21.9,
        "category": "veggie",
        "image_url": "",
        "thumbnail_url": ""
    });

    let (status, _) = call(&state, "POST", "/favorites", Some(favorite.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call(&state, "POST", "/favorites", Some(favorite)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&state, "GET", "/favorites", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = call(&state, "GET", "/favorites/2", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&state, "DELETE", "/favorites/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = call(&state, "GET", "/favorites/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&state, "DELETE", "/favorites/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_place_order_assigns_ids() {
    let state = Arc::new(AppState::default());
    let order = json!({
        "product_id": 1,
        "name": "Ao molho",
        "description": "",
        "price": 19.9,
        "category": "pasta",
        "thumbnail_url": "",
        "extras": [{ "id": 1, "name": "Bacon", "value": 1.5, "quantity": 2 }]
    });

    let (status, body) = call(&state, "POST", "/orders", Some(order.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["product_id"], 1);

    let (_, body) = call(&state, "POST", "/orders", Some(order)).await;
    assert_eq!(body["id"], 2);

    let (_, body) = call(&state, "GET", "/orders", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["extras"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_injected_failure_and_journal() {
    let state = Arc::new(AppState::default());
    state
        .fail_next(Endpoint::PlaceOrder, StatusCode::SERVICE_UNAVAILABLE)
        .await;

    let (status, body) = call(&state, "POST", "/orders", Some(json!({
        "product_id": 3,
        "name": "A la Camarón",
        "description": "",
        "price": 25.9,
        "category": "pasta",
        "thumbnail_url": "",
        "extras": []
    })))
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");
    assert!(state.orders().await.is_empty());

    let calls = state.calls_to(&[Endpoint::PlaceOrder]).await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/orders");
}

#[tokio::test]
async fn test_health() {
    let state = Arc::new(AppState::default());
    let (status, body) = call(&state, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(state.journal().await.is_empty());
}
