//! Binds a `ChatController` to the page's chat markup.
//!
//! Expects `#chat-form`, `#chat-input` (an `<input>`) and `#chat-messages`.
//! The transcript is re-rendered in full after every state change.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::net::api::HttpTransport;
use crate::net::chat_client::ChatController;
use crate::state::session::ChatSession;
use crate::util::render::render_transcript;

fn element_by_id(document: &web_sys::Document, id: &str) -> Result<web_sys::Element, String> {
    document.get_element_by_id(id).ok_or_else(|| format!("missing #{id}"))
}

fn paint(session: &ChatSession, messages: &web_sys::Element, input: &web_sys::HtmlInputElement) {
    messages.set_inner_html(&render_transcript(session.transcript()));
    messages.set_scroll_top(messages.scroll_height());

    let enabled = session.input_enabled();
    input.set_disabled(!enabled);
    if enabled {
        let _ = input.focus();
    }
}

/// Attach the chat widget.
///
/// # Errors
///
/// Returns an error string if the window or any required element is missing.
pub fn mount() -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_owned())?;
    let form = element_by_id(&document, "chat-form")?;
    let input = element_by_id(&document, "chat-input")?
        .dyn_into::<web_sys::HtmlInputElement>()
        .map_err(|_| "#chat-input is not an <input>".to_owned())?;
    let messages = element_by_id(&document, "chat-messages")?;

    let observer_input = input.clone();
    let controller = Rc::new(
        ChatController::new(HttpTransport::default())
            .with_observer(move |session: &ChatSession| paint(session, &messages, &observer_input)),
    );

    let on_submit = Closure::wrap(Box::new(move |event: web_sys::Event| {
        event.prevent_default();
        let text = input.value();
        if text.trim().is_empty() || controller.is_sending() {
            return;
        }
        input.set_value("");
        let controller = Rc::clone(&controller);
        wasm_bindgen_futures::spawn_local(async move {
            controller.submit(&text).await;
        });
    }) as Box<dyn FnMut(web_sys::Event)>);

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(|_| "failed to attach submit listener".to_owned())?;
    // The listener lives as long as the page.
    on_submit.forget();

    log::info!("chat widget mounted");
    Ok(())
}
