//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the twin chat endpoint and a health probe under one Axum router.
//! The portfolio site itself is served as static files from `WEBSITE_DIR`
//! as the fallback, so the page and its chat widget share an origin.

pub mod chat;

use std::path::{Path, PathBuf};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes: chat proxy + health.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", any(chat::chat))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Resolve the path to the portfolio website directory.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR").map_or_else(|_| PathBuf::from("public"), PathBuf::from)
}

/// Full application: API routes + static portfolio at `/`.
pub fn app(state: AppState) -> Router {
    app_with_website(state, website_dir())
}

/// Same as [`app`], serving static files from `dir`.
pub fn app_with_website(state: AppState, dir: impl AsRef<Path>) -> Router {
    let website_service = ServeDir::new(dir).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(website_service)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
