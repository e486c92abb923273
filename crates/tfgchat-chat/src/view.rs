//! Presentation state of the chat widget.
//!
//! `ChatView` owns the pending input text, the conversation history and the
//! interaction phase. Every change goes through [`ChatView::transition`]; the
//! async part (talking to the endpoint) lives in the controller, which feeds
//! the outcome back in as a [`ChatEvent::Resolved`].

use tfgchat_types::{ChatReply, Conversation, Message};

use crate::config::{ChatConfig, SubmitPolicy};
use crate::error::TransportError;

/// Correlates a dispatched question with its outcome
pub type Ticket = u64;

/// Interaction phase of the view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

/// A question the controller must deliver to the transport service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: Ticket,
    pub question: String,
}

/// Inputs of the state machine
#[derive(Debug, Clone)]
pub enum ChatEvent {
    InputChanged(String),
    Submit,
    Resolved {
        ticket: Ticket,
        outcome: Result<ChatReply, TransportError>,
    },
}

/// Result of applying an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Input text replaced, nothing else changed
    InputUpdated,
    /// Event had no effect (blank input, unknown ticket)
    Ignored,
    /// Submit refused because a reply is still pending
    Rejected,
    /// User message appended; the submission must be sent
    Dispatch(Submission),
    /// Bot message appended
    Replied,
    /// Error text recorded
    Failed,
}

#[derive(Debug, Clone)]
pub struct ChatView {
    input: String,
    history: Conversation,
    phase: Phase,
    policy: SubmitPolicy,
    error_message: String,
    /// Set by a failed reply, cleared only when a new question is dispatched
    last_error: String,
    next_ticket: Ticket,
    in_flight: Vec<Ticket>,
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new(&ChatConfig::default())
    }
}

impl ChatView {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            input: String::new(),
            history: Conversation::new(),
            phase: Phase::Idle,
            policy: config.submit_policy,
            error_message: config.error_message.clone(),
            last_error: String::new(),
            next_ticket: 1,
            in_flight: Vec::new(),
        }
    }

    /// Apply one event. This is the only place state changes.
    pub fn transition(&mut self, event: ChatEvent) -> Transition {
        match event {
            ChatEvent::InputChanged(text) => {
                self.input = text;
                Transition::InputUpdated
            }

            ChatEvent::Submit => {
                let question = self.input.trim().to_string();
                if question.is_empty() {
                    return Transition::Ignored;
                }
                if self.policy == SubmitPolicy::Exclusive && self.phase == Phase::Pending {
                    log::debug!("Submit rejected, a reply is still pending");
                    return Transition::Rejected;
                }

                let ticket = self.next_ticket;
                self.next_ticket += 1;
                self.in_flight.push(ticket);

                self.history.push(Message::user(question.clone()));
                self.input.clear();
                self.last_error.clear();
                self.phase = Phase::Pending;

                Transition::Dispatch(Submission { ticket, question })
            }

            ChatEvent::Resolved { ticket, outcome } => {
                let Some(pos) = self.in_flight.iter().position(|t| *t == ticket) else {
                    log::warn!("Ignoring outcome for unknown ticket {}", ticket);
                    return Transition::Ignored;
                };
                self.in_flight.remove(pos);

                match outcome {
                    Ok(reply) => {
                        self.history.push(Message::bot(reply.response));
                        self.phase = Phase::Succeeded;
                        Transition::Replied
                    }
                    Err(err) => {
                        log::warn!("Chat request {} failed ({}): {}", ticket, err.kind(), err);
                        self.last_error = self.error_message.clone();
                        self.phase = Phase::Failed(self.error_message.clone());
                        Transition::Failed
                    }
                }
            }
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.transition(ChatEvent::InputChanged(text.into()));
    }

    /// Submit the current input; `Some` when a request must be sent
    pub fn submit(&mut self) -> Option<Submission> {
        match self.transition(ChatEvent::Submit) {
            Transition::Dispatch(submission) => Some(submission),
            _ => None,
        }
    }

    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: Result<ChatReply, TransportError>,
    ) -> Transition {
        self.transition(ChatEvent::Resolved { ticket, outcome })
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &Conversation {
        &self.history
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Error line to display, empty when there is none.
    /// A later success does not clear it; the next dispatch does.
    pub fn error_text(&self) -> &str {
        &self.last_error
    }

    /// Number of submissions still waiting for an outcome
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}
