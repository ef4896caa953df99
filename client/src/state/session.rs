//! Per-widget chat session: the `Idle` / `Sending` / `Blocked` state machine.
//!
//! DESIGN
//! ======
//! The session is sans-IO. `begin_submit` performs every local effect of a
//! submission and hands back the request to send (if any); `complete` applies
//! the proxy outcome. The caller owns the network call in between, which keeps
//! the in-flight guard and the cap check testable without a transport.
//!
//! The cap is enforced only here, in page memory. A reload resets it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use super::chat::{ChatMessage, ConversationHistory, EntryKind, SessionCounter, Transcript};
use crate::net::types::ProxyRequest;
use crate::util::fallback::FallbackTable;

/// Trailing history entries sent with each request.
pub const HISTORY_WINDOW: usize = 10;
/// Accepted user messages per page session.
pub const SESSION_MESSAGE_CAP: u32 = 30;

pub const LIMIT_NOTICE: &str = "You've reached the message limit for this session. Reload the page to start a new conversation, or email offaryanpatel@gmail.com.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    Sending,
    /// Cap reached; terminal until reload.
    Blocked,
}

/// Result of a submission attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Ignored: empty input or a call already in flight.
    Dropped,
    /// Cap reached; a notice was appended and nothing is sent.
    LimitReached,
    /// Accepted; send this request to the proxy.
    Send(ProxyRequest),
}

/// Where an assistant reply came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplySource {
    Proxy,
    Fallback,
}

#[derive(Clone, Debug)]
pub struct ChatSession {
    phase: ChatPhase,
    history: ConversationHistory,
    counter: SessionCounter,
    transcript: Transcript,
    fallback: FallbackTable,
    /// User message of the in-flight call, for fallback matching.
    pending: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_limits(SESSION_MESSAGE_CAP, FallbackTable::default())
    }

    pub fn with_limits(cap: u32, fallback: FallbackTable) -> Self {
        Self {
            phase: ChatPhase::Idle,
            history: ConversationHistory::default(),
            counter: SessionCounter::new(cap),
            transcript: Transcript::default(),
            fallback,
            pending: None,
        }
    }

    /// Apply the local effects of a submission.
    ///
    /// The cap is checked before anything is appended, so an exhausted
    /// session never produces a request.
    pub fn begin_submit(&mut self, input: &str) -> SubmitOutcome {
        let message = input.trim();
        if self.phase == ChatPhase::Sending || message.is_empty() {
            return SubmitOutcome::Dropped;
        }
        if self.counter.is_exhausted() {
            self.transcript.push(EntryKind::Notice, LIMIT_NOTICE);
            self.phase = ChatPhase::Blocked;
            return SubmitOutcome::LimitReached;
        }

        let request = ProxyRequest { message: message.to_owned(), history: self.history.recent(HISTORY_WINDOW).to_vec() };

        self.history.push(ChatMessage::user(message));
        self.transcript.push(EntryKind::User, message);
        self.counter.increment();
        self.transcript.show_typing();
        self.pending = Some(message.to_owned());
        self.phase = ChatPhase::Sending;

        SubmitOutcome::Send(request)
    }

    /// Apply the proxy outcome for the in-flight call. Any error picks a
    /// canned reply instead; the error text itself is never shown.
    ///
    /// Returns `None` if no call was in flight.
    pub fn complete(&mut self, result: Result<String, String>) -> Option<ReplySource> {
        if self.phase != ChatPhase::Sending {
            return None;
        }
        let message = self.pending.take().unwrap_or_default();
        self.transcript.hide_typing();

        let (reply, source) = match result {
            Ok(text) => (text, ReplySource::Proxy),
            Err(_) => (self.fallback.reply_for(&message).to_owned(), ReplySource::Fallback),
        };

        self.transcript.push(EntryKind::Bot, reply.as_str());
        self.history.push(ChatMessage::assistant(reply));
        self.phase = if self.counter.is_exhausted() { ChatPhase::Blocked } else { ChatPhase::Idle };

        Some(source)
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn is_sending(&self) -> bool {
        self.phase == ChatPhase::Sending
    }

    /// Input is disabled only while a call is in flight. A blocked session
    /// keeps it enabled so further attempts can show the limit notice.
    pub fn input_enabled(&self) -> bool {
        !self.is_sending()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn counter(&self) -> SessionCounter {
        self.counter
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
