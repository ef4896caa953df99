//! Chat proxy route.
//!
//! `POST /api/chat` with `{ message, history? }` answers `{ response }` on
//! success and `{ error, code }` otherwise. The route accepts every method so
//! that non-POST requests get the same JSON error shape as other failures.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::warn;

use crate::services::twin::{self, ChatRequest, TwinError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub code: &'static str,
}

fn twin_error_to_status(err: &TwinError) -> StatusCode {
    match err {
        TwinError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        TwinError::InvalidBody | TwinError::MissingMessage | TwinError::InvalidHistory => StatusCode::BAD_REQUEST,
        TwinError::MissingApiKey { .. } | TwinError::Llm(_) | TwinError::NoResponse => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for TwinError {
    fn into_response(self) -> Response {
        let status = twin_error_to_status(&self);
        if let TwinError::MissingApiKey { var } = &self {
            warn!(%var, "chat: API key env var not set");
        }
        let mut response =
            (status, Json(ErrorBody { error: self.public_message(), code: self.error_code() })).into_response();
        if matches!(self, TwinError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }
}

/// `ANY /api/chat`: proxy one message to the twin.
pub async fn chat(State(state): State<AppState>, method: Method, body: Bytes) -> Result<Json<ChatReply>, TwinError> {
    if method != Method::POST {
        return Err(TwinError::MethodNotAllowed);
    }
    let request = ChatRequest::from_body(&body)?;
    let response = twin::handle_message(&state, &request).await?;
    Ok(Json(ChatReply { response }))
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
