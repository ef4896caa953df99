//! Wire DTOs for the chat proxy.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::Serialize;

use crate::state::chat::ChatMessage;

/// Body of `POST /api/chat`.
///
/// `history` holds prior turns only; the server appends `message` itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProxyRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
}
