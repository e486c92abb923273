use tfgchat_types::{ChatReply, ChatRequest, SessionId};

use crate::config::ChatConfig;
use crate::error::TransportError;
use crate::transport::ChatTransport;

/// Turns a question into one POST to the chat endpoint.
///
/// The session identifier is generated once when the service is built and sent
/// unchanged with every request for the lifetime of the service.
pub struct ChatService<T> {
    endpoint: String,
    session_id: SessionId,
    transport: T,
}

impl<T: ChatTransport> ChatService<T> {
    /// Create a service with a freshly generated session identifier
    pub fn new(config: &ChatConfig, transport: T) -> Self {
        Self::with_session_id(config, transport, SessionId::generate())
    }

    /// Create a service reusing a known session identifier
    pub fn with_session_id(config: &ChatConfig, transport: T, session_id: SessionId) -> Self {
        log::info!(
            "Chat service for {} using session {}",
            config.endpoint,
            session_id
        );
        Self {
            endpoint: config.endpoint.clone(),
            session_id,
            transport,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a question and return the decoded reply.
    ///
    /// The question is passed through as is, empty strings included.
    pub async fn send_question(&self, question: &str) -> Result<ChatReply, TransportError> {
        let request = ChatRequest {
            question: question.to_string(),
            session_id: self.session_id.clone(),
        };
        self.transport.post_chat(&self.endpoint, &request).await
    }
}
