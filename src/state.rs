//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It carries no per-conversation data: every chat request brings its own
//! history, so the only shared pieces are the upstream client and the
//! config that names where the credential lives.

use std::sync::Arc;

use crate::llm::GenerateContent;
use crate::llm::config::LlmConfig;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn GenerateContent>,
    pub config: Arc<LlmConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Arc<dyn GenerateContent>, config: LlmConfig) -> Self {
        Self { llm, config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
