use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tfgchat_types::{ChatReply, ChatRequest, SessionId};

/// Prefix of every echoed reply
pub const ECHO_PREFIX: &str = "Recibí tu mensaje: ";

/// Application state shared across routes
#[derive(Clone, Default)]
pub struct AppState {
    /// Question count per session. Development only: entries are never evicted.
    sessions: Arc<Mutex<HashMap<SessionId, usize>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more question for `session_id`, returning the new total
    fn record_question(&self, session_id: &SessionId) -> usize {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let count = sessions.entry(session_id.clone()).or_insert(0);
        *count += 1;
        *count
    }

    fn snapshot(&self) -> Vec<SessionSummary> {
        let sessions = self
            .sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut summaries: Vec<SessionSummary> = sessions
            .iter()
            .map(|(session_id, questions)| SessionSummary {
                session_id: session_id.clone(),
                questions: *questions,
            })
            .collect();
        summaries.sort_by(|a, b| a.session_id.as_str().cmp(b.session_id.as_str()));
        summaries
    }
}

/// Questions seen per session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub questions: usize,
}

/// Create router with all routes:
/// `POST /chat`, `GET /api/sessions` and `GET /health`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/api/sessions", get(list_sessions))
        .route("/health", get(health))
        .with_state(state)
}

/// POST /chat - Answer a question
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(payload) = payload?;
    let request: ChatRequest = serde_json::from_value(payload)?;
    let turn = state.record_question(&request.session_id);

    log::info!(
        "Question #{} from session {}: {:?}",
        turn,
        request.session_id,
        request.question
    );

    Ok(Json(ChatReply::new(format!(
        "{}{}",
        ECHO_PREFIX, request.question
    ))))
}

/// GET /api/sessions - Sessions seen so far
async fn list_sessions(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "sessions": state.snapshot() }))
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Error type for handlers
#[derive(Debug)]
pub enum AppError {
    /// Body missing, not JSON, or sent without a JSON content type
    Rejection(JsonRejection),
    SerdeJson(serde_json::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejection(rejection)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerdeJson(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Rejection(rejection) => (rejection.status(), rejection.body_text()),
            AppError::SerdeJson(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
