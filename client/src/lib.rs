//! # client
//!
//! Browser-side logic for the portfolio's AI twin chat widget.
//!
//! The conversation state machine (`state::session`) is sans-IO so it can be
//! unit tested natively; `net::chat_client` drives it against any
//! `ChatTransport`, and `util::dom` binds it to the page when built with the
//! `hydrate` feature.

pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: mount the chat widget onto the current page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = util::dom::mount() {
        log::warn!("chat widget not mounted: {e}");
    }
}
