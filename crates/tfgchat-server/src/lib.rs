//! Development stand-in for the chat endpoint.
//!
//! Answers every question with an echo so the widget and the terminal client
//! can be exercised without the retrieval backend.

pub mod routes;
pub mod server;

pub use routes::{create_router, AppState, ECHO_PREFIX};
pub use server::{ChatServer, ServerConfig};
