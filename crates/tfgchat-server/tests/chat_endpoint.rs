use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use tfgchat_server::{create_router, AppState, ChatServer, ServerConfig};

fn post_chat(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_chat_echoes_question() {
    let app = create_router(AppState::new());

    let (status, body) = send(
        app,
        post_chat(json!({ "question": "Hola", "session_id": "s-1" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "Recibí tu mensaje: Hola" }));
}

#[tokio::test]
async fn test_chat_rejects_missing_session_id() {
    let app = create_router(AppState::new());

    let (status, body) = send(app, post_chat(json!({ "question": "Hola" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("session_id"));
}

#[tokio::test]
async fn test_chat_rejects_malformed_json_with_json_error() {
    let app = create_router(AppState::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_chat_without_content_type_gets_json_error() {
    let app = create_router(AppState::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .body(Body::from(r#"{"question":"Hola","session_id":"s-1"}"#))
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["status"], 415);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_sessions_are_counted() {
    let state = AppState::new();
    let app = create_router(state.clone());

    for question in ["uno", "dos"] {
        let (status, _) = send(
            app.clone(),
            post_chat(json!({ "question": question, "session_id": "s-2" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let request = Request::builder()
        .uri("/api/sessions")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "sessions": [{ "session_id": "s-2", "questions": 2 }] })
    );
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let server = ChatServer::new(ServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        web_dir: None,
    });

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/chat")
        .header(header::ORIGIN, "http://localhost:4200")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = server.router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_health() {
    let app = create_router(AppState::new());
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}
