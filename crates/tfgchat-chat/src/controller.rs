use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tfgchat_types::SessionId;

use crate::config::ChatConfig;
use crate::service::ChatService;
use crate::transport::ChatTransport;
use crate::view::{ChatEvent, ChatView, Transition};

/// How a single submit ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, nothing was sent
    Ignored,
    /// A reply was still pending and the policy forbids overlapping
    Rejected,
    /// Bot reply appended to history
    Replied(String),
    /// Request failed, carries the error text shown to the user
    Failed(String),
}

type Observer = Rc<dyn Fn(&ChatView)>;

/// Drives a [`ChatView`] against a [`ChatService`] on a single thread.
///
/// The view is never borrowed across the network call, so a second submit can
/// run while the first one is still waiting for its reply.
pub struct ChatController<T> {
    view: Rc<RefCell<ChatView>>,
    service: Rc<ChatService<T>>,
    observer: Option<Observer>,
}

impl<T> Clone for ChatController<T> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            service: self.service.clone(),
            observer: self.observer.clone(),
        }
    }
}

impl<T: ChatTransport> ChatController<T> {
    pub fn new(config: &ChatConfig, transport: T) -> Self {
        Self::from_parts(ChatView::new(config), ChatService::new(config, transport))
    }

    pub fn from_parts(view: ChatView, service: ChatService<T>) -> Self {
        Self {
            view: Rc::new(RefCell::new(view)),
            service: Rc::new(service),
            observer: None,
        }
    }

    /// Register a callback run after every state change (re-render hook)
    pub fn on_change(mut self, observer: impl Fn(&ChatView) + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    pub fn view(&self) -> Ref<'_, ChatView> {
        self.view.borrow()
    }

    pub fn session_id(&self) -> &SessionId {
        self.service.session_id()
    }

    pub fn service(&self) -> &ChatService<T> {
        &self.service
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.view.borrow_mut().set_input(text);
        self.notify();
    }

    /// Replace the input with `text` and submit it
    pub async fn submit_text(&self, text: impl Into<String>) -> SubmitOutcome {
        self.set_input(text);
        self.submit().await
    }

    /// Submit the current input and wait for the outcome
    pub async fn submit(&self) -> SubmitOutcome {
        let transition = self.view.borrow_mut().transition(ChatEvent::Submit);
        let submission = match transition {
            Transition::Dispatch(submission) => submission,
            Transition::Rejected => return SubmitOutcome::Rejected,
            _ => return SubmitOutcome::Ignored,
        };
        self.notify();

        let outcome = self.service.send_question(&submission.question).await;
        let reply_text = outcome.as_ref().map(|reply| reply.response.clone()).ok();

        let transition = self.view.borrow_mut().resolve(submission.ticket, outcome);
        self.notify();

        match (transition, reply_text) {
            (Transition::Replied, Some(text)) => SubmitOutcome::Replied(text),
            (Transition::Failed, _) => {
                SubmitOutcome::Failed(self.view.borrow().error_text().to_string())
            }
            _ => SubmitOutcome::Ignored,
        }
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer(&self.view.borrow());
        }
    }
}
