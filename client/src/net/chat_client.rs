//! Async driver that runs a `ChatSession` over a `ChatTransport`.
//!
//! DESIGN
//! ======
//! The session lives in a `RefCell` and every borrow ends before the transport
//! is awaited, so a second submit arriving mid-flight sees `Sending` and is
//! dropped instead of panicking on a double borrow.

#[cfg(test)]
#[path = "chat_client_test.rs"]
mod chat_client_test;

use std::cell::{Ref, RefCell};

use super::types::ProxyRequest;
use crate::state::session::{ChatSession, SubmitOutcome};

/// Anything that can deliver a chat request and return the reply text.
#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    /// # Errors
    ///
    /// Returns an error string on any transport or protocol failure.
    async fn send(&self, request: &ProxyRequest) -> Result<String, String>;
}

type Observer = Box<dyn Fn(&ChatSession)>;

pub struct ChatController<T> {
    session: RefCell<ChatSession>,
    transport: T,
    observer: Option<Observer>,
}

impl<T: ChatTransport> ChatController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_session(ChatSession::new(), transport)
    }

    pub fn with_session(session: ChatSession, transport: T) -> Self {
        Self { session: RefCell::new(session), transport, observer: None }
    }

    /// Register a callback run after every state change, e.g. to re-render.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&ChatSession) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Submit one visitor message and wait for the reply (or fallback).
    pub async fn submit(&self, input: &str) {
        let outcome = self.session.borrow_mut().begin_submit(input);
        let request = match outcome {
            SubmitOutcome::Send(request) => request,
            SubmitOutcome::LimitReached => {
                self.notify();
                return;
            }
            SubmitOutcome::Dropped => return,
        };
        self.notify();

        let result = self.transport.send(&request).await;
        #[cfg(feature = "hydrate")]
        {
            if let Err(e) = &result {
                log::warn!("chat request failed, using fallback: {e}");
            }
        }

        self.session.borrow_mut().complete(result);
        self.notify();
    }

    pub fn session(&self) -> Ref<'_, ChatSession> {
        self.session.borrow()
    }

    pub fn is_sending(&self) -> bool {
        self.session.borrow().is_sending()
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer(&self.session.borrow());
        }
    }
}
