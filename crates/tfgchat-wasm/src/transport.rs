use async_trait::async_trait;
use gloo_net::http::Request;
use tfgchat_chat::{decode_reply, ChatReply, ChatRequest, ChatTransport, TransportError};

/// Transport using the browser's fetch API
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl ChatTransport for FetchTransport {
    async fn post_chat(
        &self,
        endpoint: &str,
        request: &ChatRequest,
    ) -> Result<ChatReply, TransportError> {
        log::debug!("POST {} (session {})", endpoint, request.session_id);

        let response = Request::post(endpoint)
            .json(request)
            .map_err(|e| TransportError::Network(format!("Failed to serialize: {}", e)))?
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(format!("Failed to read body: {}", e)))?;

        decode_reply(status, &body)
    }
}
