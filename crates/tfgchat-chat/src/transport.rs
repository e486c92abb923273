use async_trait::async_trait;
use tfgchat_types::{ChatReply, ChatRequest};

use crate::error::TransportError;

/// Something that can deliver a chat request to an endpoint.
///
/// Front ends run on a single thread (browser event loop, terminal REPL), so
/// implementations are not required to be `Send`.
#[async_trait(?Send)]
pub trait ChatTransport {
    async fn post_chat(
        &self,
        endpoint: &str,
        request: &ChatRequest,
    ) -> Result<ChatReply, TransportError>;
}

#[async_trait(?Send)]
impl<T: ChatTransport + ?Sized> ChatTransport for std::rc::Rc<T> {
    async fn post_chat(
        &self,
        endpoint: &str,
        request: &ChatRequest,
    ) -> Result<ChatReply, TransportError> {
        (**self).post_chat(endpoint, request).await
    }
}

/// Decode a reply body, keeping the status check separate from parsing
pub fn decode_reply(status: u16, body: &str) -> Result<ChatReply, TransportError> {
    if !(200..300).contains(&status) {
        return Err(TransportError::Status {
            status,
            body: body.to_string(),
        });
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use super::*;

    /// reqwest backed transport used by native front ends
    #[derive(Debug, Clone, Default)]
    pub struct HttpTransport {
        client: reqwest::Client,
    }

    impl HttpTransport {
        pub fn new() -> Self {
            Self {
                client: reqwest::Client::new(),
            }
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait(?Send)]
    impl ChatTransport for HttpTransport {
        async fn post_chat(
            &self,
            endpoint: &str,
            request: &ChatRequest,
        ) -> Result<ChatReply, TransportError> {
            log::debug!("POST {} (session {})", endpoint, request.session_id);

            let response = self
                .client
                .post(endpoint)
                .json(request)
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;

            decode_reply(status, &body)
        }
    }
}
