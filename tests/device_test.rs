use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

mod common;
use common::mock_app::MockApp;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(Method::GET)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(Method::POST)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_devices_empty() {
    let app = MockApp::new().await.with_device_handle();

    let response = app.router.clone().oneshot(get("/devices")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({}));
}

#[tokio::test]
async fn test_list_devices() {
    let app = MockApp::new().await.with_device_handle();
    app.seed_realtime("devices", json!({ "lamp": "ON", "fan": "OFF" }))
        .await;

    let response = app.router.clone().oneshot(get("/devices")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "lamp": "ON", "fan": "OFF" })
    );
}

#[tokio::test]
async fn test_get_device() {
    let app = MockApp::new().await.with_device_handle();
    app.seed_realtime("devices", json!({ "lamp": "ON" })).await;

    let response = app
        .router
        .clone()
        .oneshot(get("/devices/lamp"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "lamp": "ON" }));
}

#[tokio::test]
async fn test_get_unknown_device_is_null() {
    let app = MockApp::new().await.with_device_handle();

    let response = app
        .router
        .clone()
        .oneshot(get("/devices/ghost"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "ghost": null }));
}

#[tokio::test]
async fn test_toggle_device() {
    let app = MockApp::new().await.with_device_handle();

    let response = app
        .router
        .clone()
        .oneshot(post_json("/devices/lamp/toggle", json!({ "state": "ON" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "success": true, "id": "lamp", "state": "ON" })
    );

    assert_eq!(app.realtime.snapshot()["devices"]["lamp"], json!("ON"));
}

#[tokio::test]
async fn test_toggle_device_is_idempotent() {
    let app = MockApp::new().await.with_device_handle();

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/devices/lamp/toggle", json!({ "state": "ON" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(app.realtime.snapshot()["devices"], json!({ "lamp": "ON" }));
}

#[tokio::test]
async fn test_toggle_rejects_bad_state() {
    let app = MockApp::new().await.with_device_handle();

    let response = app
        .router
        .clone()
        .oneshot(post_json("/devices/lamp/toggle", json!({ "state": "DIMMED" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .router
        .clone()
        .oneshot(post_json("/devices/lamp/toggle", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Lowercase is not normalized.
    let response = app
        .router
        .clone()
        .oneshot(post_json("/devices/lamp/toggle", json!({ "state": "on" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggle_all_devices() {
    let app = MockApp::new().await.with_device_handle();
    app.seed_realtime("devices", json!({ "lamp": "ON", "fan": "OFF", "ac": "ON" }))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(post_json("/devices/toggleAll", json!({ "state": "OFF" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "success": true, "state": "OFF" })
    );

    // Every previously-present key is OFF and no key was added.
    assert_eq!(
        app.realtime.snapshot()["devices"],
        json!({ "lamp": "OFF", "fan": "OFF", "ac": "OFF" })
    );
}

#[tokio::test]
async fn test_toggle_all_on_empty_map_is_noop() {
    let app = MockApp::new().await.with_device_handle();

    let response = app
        .router
        .clone()
        .oneshot(post_json("/devices/toggleAll", json!({ "state": "OFF" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "success": true, "state": "OFF" })
    );

    let response = app.router.clone().oneshot(get("/devices")).await.unwrap();
    assert_eq!(json_body(response).await, json!({}));
}

#[tokio::test]
async fn test_toggle_all_rejects_bad_state() {
    let app = MockApp::new().await.with_device_handle();

    let response = app
        .router
        .clone()
        .oneshot(post_json("/devices/toggleAll", json!({ "state": "AUTO" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
