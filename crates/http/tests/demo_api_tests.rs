//! Integration tests for the in-memory demo surface

#![cfg(feature = "server")]

use counsel_http::state::DEFAULT_SESSION_ID;
use counsel_http::types::{
    CreateSessionResponse, DeleteSessionResponse, MessageListResponse, SendMessageResponse,
    Sender, SessionListResponse,
};
use counsel_http::{DemoState, routes};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Spawn the demo router on an ephemeral port
async fn start_demo_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (router, _api) = routes::router().split_for_parts();
    let app = router.with_state(DemoState::seeded());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });

    addr
}

#[tokio::test]
async fn test_list_starts_with_seeded_session() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let body: SessionListResponse = client
        .get(format!("http://{addr}/api/chat-sessions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(body.success);
    assert_eq!(body.total, 1);
    assert_eq!(body.sessions[0].id, DEFAULT_SESSION_ID);
}

#[tokio::test]
async fn test_create_session_appears_in_list() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/api/chat-sessions"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let created: CreateSessionResponse = response.json().await.unwrap();
    assert!(created.success);
    assert!(created.session.id.starts_with("session-"));

    let listed: SessionListResponse = client
        .get(format!("http://{addr}/api/chat-sessions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.total, 2);
    assert!(listed.sessions.iter().any(|s| s.id == created.session.id));
}

#[tokio::test]
async fn test_delete_requires_session_id() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("http://{addr}/api/chat-sessions"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("session id"));
}

#[tokio::test]
async fn test_delete_unknown_session_is_not_found() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("http://{addr}/api/chat-sessions?sessionId=nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_deleted_session_is_absent_from_list() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let created: CreateSessionResponse = client
        .post(format!("http://{addr}/api/chat-sessions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let deleted: DeleteSessionResponse = client
        .delete(format!(
            "http://{addr}/api/chat-sessions?sessionId={}",
            created.session.id
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(deleted.success);

    let listed: SessionListResponse = client
        .get(format!("http://{addr}/api/chat-sessions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.sessions.iter().all(|s| s.id != created.session.id));
}

#[tokio::test]
async fn test_messages_default_to_seeded_session() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let body: MessageListResponse = client
        .get(format!("http://{addr}/api/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(body.success);
    assert_eq!(body.total, 1);
    assert_eq!(body.messages[0].sender, Sender::Bot);
}

#[tokio::test]
async fn test_messages_for_unknown_session() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/api/messages?sessionId=nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_send_message_appends_exchange() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/api/messages"))
        .json(&json!({"text": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let body: SendMessageResponse = response.json().await.unwrap();
    assert!(body.success);
    assert_eq!(body.user_message.text, "hello");
    assert_eq!(body.user_message.sender, Sender::User);
    assert_eq!(body.bot_message.sender, Sender::Bot);
    assert_eq!(body.bot_message.text, "Hello! How can I help you today?");

    let history: MessageListResponse = client
        .get(format!("http://{addr}/api/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history.total, 3);

    // First user message becomes the session title
    let listed: SessionListResponse = client
        .get(format!("http://{addr}/api/chat-sessions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.sessions[0].title, "hello");
}

#[tokio::test]
async fn test_send_blank_message_is_rejected() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/api/messages"))
        .json(&json!({"text": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_send_to_unknown_session() {
    let addr = start_demo_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/api/messages"))
        .json(&json!({"text": "hello", "sessionId": "nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
