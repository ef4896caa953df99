//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper over `models/{model}:generateContent`. The key travels
//! in the `x-goog-api-key` header so it never appears in a URL that could end
//! up in a transport error message. Pure parsing in `parse_response` for
//! testability.

use std::time::Duration;

use super::config::LlmConfig;
use super::types::{GenerateContent, GenerateContentRequest, GenerateContentResponse, LlmError};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    url: String,
}

impl GeminiClient {
    /// Build a client for the configured model.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the TLS backend fails to initialize.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: config.generate_url() })
    }
}

#[async_trait::async_trait]
impl GenerateContent for GeminiClient {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(LlmError::ApiResponse { status: status.as_u16(), body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<GenerateContentResponse, LlmError> {
    serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
