//! # Flameboard Binary
//!
//! The entry point that assembles the application: one explicit store
//! instance and one generator, dependency-injected into the API router.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use fl_api::AppState;
use fl_generate_openai::OpenAiGenerator;
use fl_storage_mem::MemFlameStore;

use crate::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("failed to load settings")?;

    // 1. Storage: transient in-memory store, pre-seeded so the UI isn't empty
    let store = Arc::new(MemFlameStore::seeded());

    // 2. Generation: OpenAI-backed; without a key every /api/generate fails
    //    with a descriptive upstream error, the rest of the API still works
    let api_key = settings.openai.api_key.clone().unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("no OpenAI API key configured; generation requests will fail");
    }
    let generator = Arc::new(OpenAiGenerator::new(
        api_key,
        settings.openai.model.clone(),
        settings.openai.base_url.clone(),
    ));

    // 3. Wire everything into the router
    let app = fl_api::router(AppState { store, generator });

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("🔥 Flameboard listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
