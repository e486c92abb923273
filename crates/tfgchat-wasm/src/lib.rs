use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use tfgchat_chat::{ChatConfig, SubmitPolicy};

mod chat_ui;
mod dom;
mod markdown;
mod transport;
mod utils;

pub use transport::FetchTransport;

/// Initialize the WASM application
/// This sets up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("tfgchat WASM initialized");
}

/// Bind the chat widget to the page.
///
/// `endpoint` may be a full URL or a path on the page origin; it defaults to
/// `http://localhost:8000/chat`. With `exclusive` set, the send button is
/// disabled until the pending reply arrives.
#[wasm_bindgen]
pub fn init_chat_widget(endpoint: Option<String>, exclusive: Option<bool>) -> Result<(), JsValue> {
    let origin = utils::get_origin();
    let mut config = ChatConfig::default()
        .with_endpoint(utils::resolve_endpoint(endpoint, origin.as_deref()));
    if exclusive.unwrap_or(false) {
        config = config.with_submit_policy(SubmitPolicy::Exclusive);
    }

    chat_ui::ChatWidget::new(config)?.start()
}

/// Get the window object
fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))
}

/// Get the document object
fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))
}
