use super::*;
use crate::Config;
use crate::downloader::test_helpers::{
    FAILURE_SCRIPT, TestDownloader, create_test_downloader, create_test_downloader_with_script,
    mock_model_server, snapshot,
};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;
use tower::ServiceExt;


const PREFIX: &str = "/simple-model-downloader";

/// Router over the test downloader's temp models directory
fn test_app(t: &TestDownloader) -> Router {
    create_router(Arc::new(t.downloader.clone()))
}

/// Router over a downloader built from the test config after `adjust`
fn test_app_with(t: &TestDownloader, adjust: impl FnOnce(&mut Config)) -> Router {
    create_router(Arc::new(downloader_with(t, adjust)))
}

fn downloader_with(t: &TestDownloader, adjust: impl FnOnce(&mut Config)) -> ModelDownloader {
    let mut config = (*t.downloader.get_config()).clone();
    adjust(&mut config);
    ModelDownloader::new(config, Arc::new(t.bus.clone())).unwrap()
}

fn post_json(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("{PREFIX}{path}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(path: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("{PREFIX}{path}"))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_api_server_spawns() {
    let t = create_test_downloader();

    // Port 0 = OS assigns a free port
    let downloader = Arc::new(downloader_with(&t, |config| {
        config.api.bind_address = "127.0.0.1:0".parse().unwrap();
    }));

    let api_handle = tokio::spawn({
        let bus = t.bus.clone();
        async move { start_api_server(downloader, bus).await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!api_handle.is_finished(), "server should still be running");

    api_handle.abort();
}

#[tokio::test]
async fn test_cors_enabled() {
    let t = create_test_downloader();
    let app = test_app(&t);

    let request = Request::builder()
        .uri(format!("{PREFIX}/health"))
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let t = create_test_downloader();
    let app = test_app_with(&t, |config| config.api.cors_enabled = false);

    let request = Request::builder()
        .uri(format!("{PREFIX}/health"))
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let t = create_test_downloader();
    let app = test_app_with(&t, |config| {
        config.api.cors_origins = vec!["http://localhost:8188".into()];
    });

    let request = Request::builder()
        .uri(format!("{PREFIX}/health"))
        .header("Origin", "http://localhost:8188")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:8188"
    );
}

#[tokio::test]
async fn test_custom_route_prefix() {
    let t = create_test_downloader();
    let app = test_app_with(&t, |config| config.api.route_prefix = "/models-api/".into());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/models-api/directories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/directories")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_swagger_ui_toggle() {
    let t = create_test_downloader();
    let app = test_app(&t);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = test_app_with(&t, |config| config.api.swagger_ui = false);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_router_follows_downloader_config() {
    let t = create_test_downloader();
    let downloader = Arc::new(downloader_with(&t, |config| {
        config.api.route_prefix = "/dl".into();
        config.api.cors_enabled = false;
    }));
    assert_eq!(downloader.get_config().api.route_prefix, "/dl");

    let app = create_router(downloader);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/dl/health")
                .header("Origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
