use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlTextAreaElement};

use tfgchat_chat::{ChatConfig, ChatController, ChatView, SubmitOutcome, SubmitPolicy};

use crate::dom;
use crate::markdown;
use crate::transport::FetchTransport;

const MESSAGES_ID: &str = "messagesContainer";
const INPUT_ID: &str = "messageInput";
const SEND_BUTTON_ID: &str = "sendButton";
const LOADING_ID: &str = "loadingIndicator";
const ERROR_ID: &str = "errorLine";

pub struct ChatWidget {
    document: Document,
    controller: ChatController<FetchTransport>,
    renderer: Rc<Renderer>,
}

/// Mirrors the view state into the DOM
struct Renderer {
    document: Document,
    messages: Element,
    input: HtmlTextAreaElement,
    send_button: HtmlElement,
    loading: HtmlElement,
    error_line: HtmlElement,
    lock_while_pending: bool,
    /// Number of history entries already in the DOM
    rendered: Cell<usize>,
}

impl ChatWidget {
    pub fn new(config: ChatConfig) -> Result<Self, JsValue> {
        let document = crate::document()?;
        let renderer = Rc::new(Renderer::new(&document, &config)?);

        let observer = renderer.clone();
        let controller = ChatController::new(&config, FetchTransport).on_change(move |view| {
            if let Err(e) = observer.render(view) {
                log::error!("Failed to render chat: {:?}", e);
            }
        });

        Ok(Self {
            document,
            controller,
            renderer,
        })
    }

    pub fn start(self) -> Result<(), JsValue> {
        log::info!(
            "Chat widget ready for {} (session {})",
            self.controller.service().endpoint(),
            self.controller.session_id()
        );

        dom::clear_element(&self.renderer.messages);
        self.renderer.render(&self.controller.view())?;

        self.setup_input_tracking()?;
        self.setup_send_button()?;
        self.setup_enter_key()?;

        Ok(())
    }

    fn setup_input_tracking(&self) -> Result<(), JsValue> {
        let input = dom::get_textarea_by_id(&self.document, INPUT_ID)?;
        let controller = self.controller.clone();

        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(textarea) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok())
            {
                controller.set_input(textarea.value());
            }
        }) as Box<dyn FnMut(_)>);

        input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn setup_send_button(&self) -> Result<(), JsValue> {
        let send_btn = dom::get_element_by_id(&self.document, SEND_BUTTON_ID)?;
        let controller = self.controller.clone();
        let input = self.renderer.input.clone();

        let closure = Closure::wrap(Box::new(move || {
            submit_from_input(&controller, &input);
        }) as Box<dyn FnMut()>);

        send_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn setup_enter_key(&self) -> Result<(), JsValue> {
        let controller = self.controller.clone();
        let input = self.renderer.input.clone();

        let closure = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                submit_from_input(&controller, &input);
            }
        }) as Box<dyn FnMut(_)>);

        self.renderer
            .input
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }
}

/// Take the textarea content as input and send it without blocking the event handler
fn submit_from_input(controller: &ChatController<FetchTransport>, input: &HtmlTextAreaElement) {
    controller.set_input(input.value());
    let controller = controller.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match controller.submit().await {
            SubmitOutcome::Replied(_) => log::debug!("Reply received"),
            SubmitOutcome::Failed(message) => log::debug!("Submit failed: {}", message),
            SubmitOutcome::Rejected => log::debug!("Submit rejected while pending"),
            SubmitOutcome::Ignored => {}
        }
    });
}

impl Renderer {
    fn new(document: &Document, config: &ChatConfig) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            messages: dom::get_element_by_id(document, MESSAGES_ID)?,
            input: dom::get_textarea_by_id(document, INPUT_ID)?,
            send_button: dom::get_html_element_by_id(document, SEND_BUTTON_ID)?,
            loading: dom::get_html_element_by_id(document, LOADING_ID)?,
            error_line: dom::get_html_element_by_id(document, ERROR_ID)?,
            lock_while_pending: config.submit_policy == SubmitPolicy::Exclusive,
            rendered: Cell::new(0),
        })
    }

    fn render(&self, view: &ChatView) -> Result<(), JsValue> {
        // History is append-only, so only the tail needs adding
        let history = view.history().as_slice();
        let already = self.rendered.get().min(history.len());
        for message in &history[already..] {
            let msg_div = dom::create_element_with_class(
                &self.document,
                "div",
                &format!("message {}", message.sender),
            )?;
            let html = format!(
                r#"<div class="message-role">{}</div><div class="message-content">{}</div>"#,
                message.sender,
                markdown::render_message_content(message.sender, &message.text)
            );
            msg_div.set_inner_html(&html);
            self.messages.append_child(&msg_div)?;
        }
        if history.len() > already {
            self.rendered.set(history.len());
            dom::scroll_to_bottom(&self.messages);
        }

        dom::set_visible(&self.loading, view.is_loading());

        let error = view.error_text();
        self.error_line.set_text_content(Some(error));
        dom::set_visible(&self.error_line, !error.is_empty());

        if self.input.value() != view.input() {
            self.input.set_value(view.input());
        }

        if self.lock_while_pending {
            if view.is_loading() {
                self.send_button.set_attribute("disabled", "")?;
            } else {
                self.send_button.remove_attribute("disabled")?;
            }
        }

        Ok(())
    }
}
