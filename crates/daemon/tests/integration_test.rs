//! Integration tests for daemon server startup

use counsel_daemon::config::DaemonConfig;
use counsel_daemon::server;
use counsel_http::DemoState;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Start the assembled application on an ephemeral port
async fn start_test_server(settings: DaemonConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = server::build_app(&settings, DemoState::seeded());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });

    addr
}

#[tokio::test]
async fn test_server_starts_and_responds() {
    let addr = start_test_server(DaemonConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_demo_api_is_mounted() {
    let addr = start_test_server(DaemonConfig::default()).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(format!("http://{addr}/api/chat-sessions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], serde_json::json!(true));
    assert_eq!(body["total"], serde_json::json!(1));
}

#[tokio::test]
async fn test_api_docs_are_served() {
    let addr = start_test_server(DaemonConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/docs/"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_cors_headers_when_enabled() {
    let addr = start_test_server(DaemonConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/api/chat-sessions"))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
