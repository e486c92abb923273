use thiserror::Error;

/// Failure of a single call to the chat endpoint.
///
/// The chat view treats every variant the same way; the kind is kept for logs
/// and for front ends that want to show more detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request to chat endpoint failed: {0}")]
    Network(String),
    #[error("chat endpoint answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed chat reply: {0}")]
    Decode(String),
}

impl TransportError {
    /// Short label for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Network(_) => "network",
            TransportError::Status { .. } => "status",
            TransportError::Decode(_) => "decode",
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(TransportError::Network("refused".into()).kind(), "network");
        assert_eq!(
            TransportError::Status { status: 502, body: String::new() }.kind(),
            "status"
        );
        assert_eq!(TransportError::Decode("eof".into()).kind(), "decode");
    }

    #[test]
    fn test_status_error_message() {
        let err = TransportError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "chat endpoint answered with status 500: boom");
    }

    #[test]
    fn test_serde_error_maps_to_decode() {
        let err: TransportError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), "decode");
    }
}
