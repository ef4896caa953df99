//! HTTP transport for the `/api/chat` proxy.
//!
//! Client-side (hydrate): real POSTs via `gloo-net`.
//! Server-side: a stub that always fails, so a session built there falls
//! back to canned replies.
//!
//! ERROR HANDLING
//! ==============
//! Every failure collapses to an `Err(String)`. The session treats all of
//! them the same way and never shows the text to the visitor.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::chat_client::ChatTransport;
use super::types::ProxyRequest;

pub const CHAT_ENDPOINT: &str = "/api/chat";

fn chat_request_failed_message(status: u16) -> String {
    format!("chat request failed: {status}")
}

/// Interpret a proxy response.
///
/// Success requires a 2xx status and a non-empty string `response` field.
///
/// # Errors
///
/// Returns an error string for a non-2xx status, a body that is not JSON,
/// or a missing, non-string or empty `response`.
pub fn parse_proxy_reply(status: u16, body: &str) -> Result<String, String> {
    if !(200..300).contains(&status) {
        return Err(chat_request_failed_message(status));
    }
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    match value.get("response").and_then(serde_json::Value::as_str) {
        Some(text) if !text.is_empty() => Ok(text.to_owned()),
        _ => Err("reply missing response text".to_owned()),
    }
}

/// Sends chat requests to the proxy over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(CHAT_ENDPOINT)
    }
}

impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ProxyRequest) -> Result<String, String> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&self.endpoint)
                .json(request)
                .map_err(|e| e.to_string())?
                .send()
                .await
                .map_err(|e| e.to_string())?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| e.to_string())?;
            parse_proxy_reply(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err("not available on server".to_owned())
        }
    }
}
