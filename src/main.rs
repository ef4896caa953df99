mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let config = llm::config::LlmConfig::from_env().expect("invalid LLM configuration");
    let client = llm::gemini::GeminiClient::new(&config).expect("LLM HTTP client build failed");

    // The key is read per request; a missing one only fails chat calls.
    if config.api_key().is_none() {
        tracing::warn!(var = %config.api_key_env, "API key not set; chat requests will fail until it is");
    }
    tracing::info!(model = %config.model, "LLM client initialized");

    let state = state::AppState::new(Arc::new(client), config);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "portfolio listening");
    axum::serve(listener, app).await.expect("server failed");
}
