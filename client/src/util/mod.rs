//! Utility helpers shared across the chat widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! `fallback` and `render` are pure and tested natively; `dom` isolates the
//! browser bindings and only exists in `hydrate` builds.

#[cfg(feature = "hydrate")]
pub mod dom;
pub mod fallback;
pub mod render;
