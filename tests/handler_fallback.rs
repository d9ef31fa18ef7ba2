mod common;

use axum::http::{Method, StatusCode};
use common::{AppOptions, spawn_app};
use serde_json::{Value, json};

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let app = spawn_app(AppOptions::default()).await;

    let response = app.server.get("/nope").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Not Found", "path": "/nope" })
    );
    assert_eq!(
        response.header("content-type"),
        "application/json;charset=UTF-8"
    );
}

#[tokio::test]
async fn test_unknown_api_path_is_404() {
    let app = spawn_app(AppOptions::default()).await;

    let response = app.server.get("/api/unknown").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["path"], "/api/unknown");
}

#[tokio::test]
async fn test_preflight_on_any_path() {
    let app = spawn_app(AppOptions {
        credentials: None,
        ..AppOptions::default()
    })
    .await;

    for path in ["/api/search", "/anything/else"] {
        let response = app.server.method(Method::OPTIONS, path).await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(response.header("access-control-allow-origin"), "*");
        assert_eq!(
            response.header("access-control-allow-methods"),
            "GET, POST, OPTIONS"
        );
        assert_eq!(response.header("access-control-allow-headers"), "Content-Type");
        assert_eq!(response.header("access-control-max-age"), "86400");
    }
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let app = spawn_app(AppOptions::default()).await;

    let response = app.server.post("/api/search").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(app.upstream.search_calls(), 0);
}
