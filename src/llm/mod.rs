//! LLM adapter for the generative-language API behind the AI twin.
//!
//! DESIGN
//! ======
//! Uses environment variables instead of config files. `GeminiClient` is the
//! only production implementation of [`GenerateContent`]; handlers hold it
//! as a trait object so tests can substitute a recording mock.

pub mod config;
pub mod gemini;
pub mod types;

pub use types::GenerateContent;
