use std::env;

use serde::{Deserialize, Serialize};
use tfgchat_types::{DEFAULT_CHAT_URL, ENDPOINT_ENV_VAR, SERVER_ERROR_MESSAGE};

/// What happens when the user submits while a reply is still pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Every submit is dispatched, replies land in arrival order
    #[default]
    Overlap,
    /// Submits are rejected until the pending reply arrives
    Exclusive,
}

/// Configuration shared by every chat front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    pub endpoint: String,
    #[serde(default)]
    pub submit_policy: SubmitPolicy,
    #[serde(default = "default_error_message")]
    pub error_message: String,
}

fn default_error_message() -> String {
    SERVER_ERROR_MESSAGE.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHAT_URL.to_string(),
            submit_policy: SubmitPolicy::default(),
            error_message: default_error_message(),
        }
    }
}

impl ChatConfig {
    /// Defaults, with the endpoint taken from `TFGCHAT_ENDPOINT` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = env::var(ENDPOINT_ENV_VAR) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().to_string();
            }
        }
        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_submit_policy(mut self, policy: SubmitPolicy) -> Self {
        self.submit_policy = policy;
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8000/chat");
        assert_eq!(config.submit_policy, SubmitPolicy::Overlap);
        assert_eq!(config.error_message, "Error al contactar el servidor.");
    }

    #[test]
    fn test_builder_pattern() {
        let config = ChatConfig::default()
            .with_endpoint("http://example.test/chat")
            .with_submit_policy(SubmitPolicy::Exclusive)
            .with_error_message("offline");
        assert_eq!(config.endpoint, "http://example.test/chat");
        assert_eq!(config.submit_policy, SubmitPolicy::Exclusive);
        assert_eq!(config.error_message, "offline");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ChatConfig =
            serde_json::from_str(r#"{"endpoint": "http://h/chat", "submit_policy": "exclusive"}"#)
                .unwrap();
        assert_eq!(config.submit_policy, SubmitPolicy::Exclusive);
        assert_eq!(config.error_message, SERVER_ERROR_MESSAGE);
    }
}
