use pretty_assertions::assert_eq;
use serde_json::json;
use tfgchat_chat::{
    ChatConfig, ChatController, ChatService, HttpTransport, Message, SessionId, SubmitOutcome,
    TransportError, SERVER_ERROR_MESSAGE,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ChatConfig {
    ChatConfig::default().with_endpoint(format!("{}/chat", server.uri()))
}

#[tokio::test]
async fn test_posts_question_and_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "question": "Hello", "session_id": "session-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi there" })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let service =
        ChatService::with_session_id(&config, HttpTransport::new(), SessionId::from("session-1"));

    let reply = service.send_question("Hello").await.unwrap();
    assert_eq!(reply.response, "Hi there");
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let service = ChatService::new(&config_for(&server), HttpTransport::new());

    let err = service.send_question("Test").await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Status {
            status: 500,
            body: "Internal Server Error".to_string()
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "wrong field" })))
        .mount(&server)
        .await;

    let service = ChatService::new(&config_for(&server), HttpTransport::new());

    let err = service.send_question("Test").await.unwrap_err();
    assert_eq!(err.kind(), "decode");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let config = ChatConfig::default().with_endpoint("http://127.0.0.1:9/chat");
    let service = ChatService::new(&config, HttpTransport::new());

    let err = service.send_question("Test").await.unwrap_err();
    assert_eq!(err.kind(), "network");
}

#[tokio::test]
async fn test_controller_round_trip_against_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json_question("Hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi there" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json_question("Test"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let controller = ChatController::new(&config_for(&server), HttpTransport::new());

    let hello = controller.submit_text("Hello").await;
    assert_eq!(hello, SubmitOutcome::Replied("Hi there".to_string()));
    assert_eq!(controller.view().error_text(), "");

    let failed = controller.submit_text("Test").await;
    assert_eq!(failed, SubmitOutcome::Failed(SERVER_ERROR_MESSAGE.to_string()));

    let view = controller.view();
    assert_eq!(
        view.history().as_slice(),
        &[
            Message::user("Hello"),
            Message::bot("Hi there"),
            Message::user("Test"),
        ]
    );
    assert!(!view.is_loading());
    assert_eq!(view.error_text(), SERVER_ERROR_MESSAGE);
}

/// Matches requests by question, whatever the session id
fn body_json_question(question: &'static str) -> impl wiremock::Match {
    move |request: &wiremock::Request| {
        serde_json::from_slice::<serde_json::Value>(&request.body)
            .map(|body| body["question"] == question && body["session_id"].is_string())
            .unwrap_or(false)
    }
}
