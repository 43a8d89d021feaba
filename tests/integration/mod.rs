//! Integration tests for the items API.
//!
//! Each test builds a fresh router over its own store and drives it
//! in-process with `tower::ServiceExt::oneshot`.
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use demo_api::api::{create_router, AppState};
use demo_api::store::Item;

/// Minimal test client over an in-process router.
struct TestClient {
    app: Router,
}

impl TestClient {
    fn new() -> Self {
        Self {
            app: create_router(AppState::new()),
        }
    }

    async fn request(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_owned()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(&body.to_string())).await
    }

    async fn reset(&self) {
        let (status, _) = self.request("POST", "/reset", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_read_root() {
    let client = TestClient::new();
    let (status, body) = client.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello World", "version": "1.0.0"}));
}

#[tokio::test]
async fn test_health_check() {
    let client = TestClient::new();
    let (status, body) = client.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["items_count"], 0);
}

#[tokio::test]
async fn test_get_empty_items() {
    let client = TestClient::new();
    client.reset().await;

    let (status, body) = client.get("/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_and_get_item() {
    let client = TestClient::new();
    client.reset().await;

    let item = json!({"id": 1, "name": "Test Item", "price": 29.99, "is_available": true});

    let (status, body) = client.post("/items", item.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, item);

    let (status, body) = client.get("/items/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, item);

    let (status, body) = client.get("/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([item]));
}

#[tokio::test]
async fn test_create_defaults_availability() {
    let client = TestClient::new();

    let (status, body) = client
        .post("/items", json!({"id": 5, "name": "Lamp", "price": 12.5}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let created: Item = serde_json::from_value(body).unwrap();
    assert_eq!(created, Item::new(5, "Lamp", 12.5));

    let (_, body) = client.get("/items/5").await;
    assert_eq!(body["is_available"], true);
}

#[tokio::test]
async fn test_get_nonexistent_item() {
    let client = TestClient::new();
    client.reset().await;

    let (status, body) = client.get("/items/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found");
}

#[tokio::test]
async fn test_create_duplicate_item() {
    let client = TestClient::new();
    client.reset().await;

    let item = json!({"id": 1, "name": "Test Item", "price": 29.99, "is_available": true});

    let (status, _) = client.post("/items", item.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = client
        .post("/items", json!({"id": 1, "name": "Other", "price": 1.0}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("already exists"));

    // The failed attempt left the store untouched.
    let (_, body) = client.get("/items").await;
    assert_eq!(body, json!([item]));
    let (_, body) = client.get("/health").await;
    assert_eq!(body["items_count"], 1);
}

#[tokio::test]
async fn test_create_multiple_items() {
    let client = TestClient::new();
    client.reset().await;

    let items = vec![
        json!({"id": 1, "name": "Item 1", "price": 10.0, "is_available": true}),
        json!({"id": 2, "name": "Item 2", "price": 20.0, "is_available": false}),
        json!({"id": 3, "name": "Item 3", "price": 30.0, "is_available": true}),
    ];

    for item in &items {
        let (status, _) = client.post("/items", item.clone()).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = client.get("/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(items.clone()));

    for item in &items {
        let (status, body) = client.get(&format!("/items/{}", item["id"])).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body, item);
    }
}

#[tokio::test]
async fn test_reset_clears_everything() {
    let client = TestClient::new();
    for id in 1..=4 {
        client
            .post("/items", json!({"id": id, "name": format!("Item {id}"), "price": 1.0}))
            .await;
    }

    let (status, body) = client.request("POST", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Items reset", "count": 0}));

    let (_, body) = client.get("/items").await;
    assert_eq!(body, json!([]));
    let (_, body) = client.get("/health").await;
    assert_eq!(body["items_count"], 0);
}

#[tokio::test]
async fn test_invalid_payloads_are_rejected() {
    let client = TestClient::new();

    let (status, body) = client
        .post("/items", json!({"id": "one", "name": "Bad", "price": 1.0}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "id"]));
    assert_eq!(body["detail"][0]["type"], "int_parsing");

    let (status, body) = client
        .post("/items", json!({"id": 1, "name": 42, "price": 1.0}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_type");

    let (status, body) = client.request("POST", "/items", Some("{not json")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");

    let (status, body) = client.request("POST", "/items", Some("")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({"detail": [{"loc": ["body"], "msg": "Field required", "type": "missing"}]})
    );

    let (_, body) = client.get("/health").await;
    assert_eq!(body["items_count"], 0);
}

#[tokio::test]
async fn test_create_coerces_string_values() {
    let client = TestClient::new();

    let (status, body) = client
        .post(
            "/items",
            json!({"id": "1", "name": "x", "price": "2.5", "is_available": "no"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 1, "name": "x", "price": 2.5, "is_available": false})
    );

    let (status, body) = client.get("/items/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 2.5);
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let client = TestClient::new();

    let (status, _) = client.get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = client.request("DELETE", "/items", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
