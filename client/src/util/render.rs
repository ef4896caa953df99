//! HTML rendering for the chat transcript.
//!
//! All message text goes through `html_escape::encode_text` before it
//! reaches the DOM; newlines become `<br>` so multi-line replies keep their
//! shape.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::state::chat::{Transcript, TranscriptEntry};

/// Escape `text` and turn line breaks (`\n` or `\r\n`) into `<br>`.
pub fn text_to_html(text: &str) -> String {
    text.split('\n')
        .map(|line| html_escape::encode_text(line.strip_suffix('\r').unwrap_or(line)))
        .collect::<Vec<_>>()
        .join("<br>")
}

pub fn render_entry(entry: &TranscriptEntry) -> String {
    format!(
        r#"<div class="chat-message {}"><span class="chat-text">{}</span></div>"#,
        entry.kind.css_class(),
        text_to_html(&entry.text)
    )
}

pub fn render_typing() -> String {
    r#"<div class="chat-message bot typing"><span class="typing-indicator"><span></span><span></span><span></span></span></div>"#
        .to_owned()
}

/// Render every entry, followed by the typing placeholder when shown.
pub fn render_transcript(transcript: &Transcript) -> String {
    let mut html = String::new();
    for entry in transcript.entries() {
        html.push_str(&render_entry(entry));
    }
    if transcript.is_typing() {
        html.push_str(&render_typing());
    }
    html
}
