//! Networking for the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to the `/api/chat` proxy, `chat_client` drives a session over
//! any transport, and `types` defines the request wire schema.

pub mod api;
pub mod chat_client;
pub mod types;
