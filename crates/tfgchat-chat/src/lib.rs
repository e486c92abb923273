//! Chat logic for tfgchat
//!
//! - [`service`]: the transport service posting questions to the chat endpoint
//! - [`view`]: the presentation state machine (input, history, phase)
//! - [`controller`]: the async glue between the two

pub mod config;
pub mod controller;
pub mod error;
pub mod service;
pub mod transport;
pub mod view;

pub use config::{ChatConfig, SubmitPolicy};
pub use controller::{ChatController, SubmitOutcome};
pub use error::TransportError;
pub use service::ChatService;
pub use transport::{decode_reply, ChatTransport};
#[cfg(feature = "http")]
pub use transport::HttpTransport;
pub use view::{ChatEvent, ChatView, Phase, Submission, Ticket, Transition};

pub use tfgchat_types::{
    ChatReply, ChatRequest, Conversation, Message, Sender, SessionId, DEFAULT_CHAT_URL,
    SERVER_ERROR_MESSAGE,
};
