//! Health endpoint tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use pubmed_digest_bot::server::{SERVICE_NAME, create_router};

#[tokio::test]
async fn test_root_reports_running() {
    let response =
        create_router().oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"PubMed digest bot is running!");
}

#[tokio::test]
async fn test_health_returns_json_status() {
    let response = create_router()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], SERVICE_NAME);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let response = create_router()
        .oneshot(Request::get("/articles").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bind_ephemeral_port() {
    let listener = pubmed_digest_bot::server::bind(0).await.unwrap();
    assert_ne!(listener.local_addr().unwrap().port(), 0);
}

#[tokio::test]
async fn test_spawned_health_server_answers_over_tcp() {
    let listener = pubmed_digest_bot::server::bind(0).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = pubmed_digest_bot::server::spawn_health_server(listener);

    let response = reqwest::get(format!("http://127.0.0.1:{port}/health")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&response.text().await.unwrap()).unwrap();
    assert_eq!(json["service"], SERVICE_NAME);

    assert!(!handle.is_finished());
    handle.abort();
}
