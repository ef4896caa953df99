//! Twin service: chat message, persona prompt, generated reply.
//!
//! DESIGN
//! ======
//! One incoming message produces at most one upstream call. The prompt is
//! the fixed persona instruction, the trailing `HISTORY_WINDOW` turns of
//! caller-supplied history, and the new message as the final user turn.
//! Generation and safety settings are constants, never taken from the
//! caller. Nothing is kept between requests.

use serde::Deserialize;
use tracing::{error, info};

use crate::llm::types::{
    Content, GenerateContentRequest, GenerationConfig, LlmError, ROLE_USER, SafetySetting,
};
use crate::state::AppState;

/// Number of trailing history entries forwarded upstream.
pub const HISTORY_WINDOW: usize = 10;

const TEMPERATURE: f32 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 500;

const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const PERSONA: &str = "\
You are the AI Twin of Aryan Patel - a Computer Engineering student from Ahmedabad, Gujarat, India.

PERSONALITY:
- Communication style: Mix of casual and professional, never use emojis
- Can use ASCII art occasionally for visual flair when appropriate
- Direct, honest, slightly nerdy but approachable
- Passionate about clean code and building things that work

BACKGROUND:
- Computer Engineering student based in Ahmedabad, Gujarat, India
- Self-taught web developer building real projects
- Currently learning and improving: Next.js, Node.js, Java, Python
- Philosophy: \"Build things that work\" - practical over theoretical

PROJECTS (mention these when relevant):
- Monolith (monolith.patelaryan.com): Local-first browser based markdown notes app. Your notes stay on YOUR device.
- AiThena (aithena.patelaryan.com): AI-powered study copilot that transforms PDFs and videos into summaries, quizzes, and flashcards, still a work in progress
- OMA (oma.patelaryan.com): Complete order management solution for sales teams, built with React Native + Expo + Google Sheets
- Shopify Stores: Built multiple e-commerce stores including EverythingWorldwide, HouseOfKumaran, Chettinad Snacks, SpeedCubeHub

RESPONSE RULES:
- Keep responses concise: typically 2-4 sentences unless more detail is needed
- Be helpful about tech questions, projects, and skills
- For contact inquiries: email is offaryanpatel@gmail.com, also on GitHub/LinkedIn/Twitter as @aryanxpatel
- Politely redirect overly personal questions
- Never pretend to have real-time capabilities you don't have
- If you don't know something, say so honestly
- Match the user's energy - brief questions get brief answers";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TwinError {
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("request body is not valid JSON")]
    InvalidBody,
    #[error("message is missing or not a non-empty string")]
    MissingMessage,
    #[error("history is not an array of chat messages")]
    InvalidHistory,
    #[error("API key not configured (env var {var})")]
    MissingApiKey { var: String },
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("no response generated")]
    NoResponse,
}

impl TwinError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "E_METHOD_NOT_ALLOWED",
            Self::InvalidBody => "E_INVALID_BODY",
            Self::MissingMessage => "E_MISSING_MESSAGE",
            Self::InvalidHistory => "E_INVALID_HISTORY",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::Llm(e) => e.error_code(),
            Self::NoResponse => "E_NO_RESPONSE",
        }
    }

    /// Message safe to hand back to the caller. Upstream detail stays in logs.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "Method not allowed",
            Self::InvalidBody | Self::MissingMessage => "Message is required",
            Self::InvalidHistory => "History must be an array of chat messages",
            Self::MissingApiKey { .. } => "API key not configured",
            Self::Llm(LlmError::ApiResponse { .. }) => "Failed to get response from AI",
            Self::Llm(_) => "Internal server error",
            Self::NoResponse => "No response generated",
        }
    }
}

/// One prior conversation turn as sent by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// A validated chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Validate a raw JSON body. Only `message` is required; `history`
    /// defaults to empty when absent or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`TwinError::InvalidBody`], [`TwinError::MissingMessage`] or
    /// [`TwinError::InvalidHistory`].
    pub fn from_body(body: &[u8]) -> Result<Self, TwinError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(TwinError::MissingMessage);
        }
        let value: serde_json::Value = serde_json::from_slice(body).map_err(|_| TwinError::InvalidBody)?;

        let message = value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty())
            .ok_or(TwinError::MissingMessage)?
            .to_string();

        // Only the forwarded window is validated; older entries are dropped unread.
        let history = match value.get("history") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(entries)) => {
                let start = entries.len().saturating_sub(HISTORY_WINDOW);
                entries[start..]
                    .iter()
                    .map(|entry| ChatMessage::deserialize(entry).map_err(|_| TwinError::InvalidHistory))
                    .collect::<Result<Vec<_>, _>>()?
            }
            Some(_) => return Err(TwinError::InvalidHistory),
        };

        Ok(Self { message, history })
    }
}

// =============================================================================
// PROMPT ASSEMBLY
// =============================================================================

#[must_use]
pub fn persona() -> &'static str {
    PERSONA
}

/// Map trailing history plus the new message onto upstream turns.
/// `user` stays `user`; every other role becomes `model`.
#[must_use]
pub fn build_contents(history: &[ChatMessage], message: &str) -> Vec<Content> {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let mut contents: Vec<Content> = history[start..]
        .iter()
        .map(|m| {
            if m.role == ROLE_USER { Content::user(m.content.clone()) } else { Content::model(m.content.clone()) }
        })
        .collect();
    contents.push(Content::user(message));
    contents
}

#[must_use]
pub fn generation_config() -> GenerationConfig {
    GenerationConfig { temperature: TEMPERATURE, top_k: TOP_K, top_p: TOP_P, max_output_tokens: MAX_OUTPUT_TOKENS }
}

#[must_use]
pub fn safety_settings() -> Vec<SafetySetting> {
    SAFETY_CATEGORIES
        .iter()
        .map(|&category| SafetySetting { category, threshold: SAFETY_THRESHOLD })
        .collect()
}

#[must_use]
pub fn build_request(request: &ChatRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: build_contents(&request.history, &request.message),
        system_instruction: Content::system(persona()),
        generation_config: generation_config(),
        safety_settings: safety_settings(),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Forward one validated message upstream and return the generated text.
///
/// # Errors
///
/// Returns [`TwinError::MissingApiKey`] before any upstream call when the
/// credential is absent, [`TwinError::Llm`] on transport or status failure,
/// and [`TwinError::NoResponse`] when the upstream yields no text.
pub async fn handle_message(state: &AppState, request: &ChatRequest) -> Result<String, TwinError> {
    info!(message_len = request.message.len(), history_len = request.history.len(), "twin: message received");

    let api_key = state
        .config
        .api_key()
        .ok_or_else(|| TwinError::MissingApiKey { var: state.config.api_key_env.clone() })?;

    let body = build_request(request);
    let response = state
        .llm
        .generate(&api_key, &body)
        .await
        .inspect_err(|e| match e {
            LlmError::ApiResponse { status, body } => {
                error!(status, body = %body, "twin: upstream returned error status");
            }
            other => error!(error = %other, "twin: upstream call failed"),
        })?;

    let Some(text) = response.first_text() else {
        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .unwrap_or("none");
        error!(candidates = response.candidates.len(), finish_reason, "twin: no text in upstream response");
        return Err(TwinError::NoResponse);
    };

    info!(reply_len = text.len(), "twin: reply generated");
    Ok(text.to_string())
}

#[cfg(test)]
#[path = "twin_test.rs"]
mod tests;
