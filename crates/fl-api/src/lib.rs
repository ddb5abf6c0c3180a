//! # fl-api
//!
//! The web routing and orchestration layer for Flameboard.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use fl_core::traits::{FlameGenerator, FlameStore};

/// State shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FlameStore>,
    pub generator: Arc<dyn FlameGenerator>,
}

/// Builds the API router.
///
/// # Developer Note
/// Everything lives under /api so the main binary can mount a static UI
/// or other surfaces next to it later.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Generation
        .route("/api/generate", post(handlers::generate))
        .route("/api/generations", get(handlers::list_generations))
        .route("/api/generations/{id}", get(handlers::get_generation))
        .route("/api/generations/{id}/rate", post(handlers::rate_generation))
        // Flames
        .route("/api/flames", post(handlers::submit_flame).get(handlers::list_approved_flames))
        .route("/api/flames/all", get(handlers::list_all_flames))
        .route("/api/flames/{id}", get(handlers::get_flame).patch(handlers::update_flame))
        .route("/api/flames/{id}/like", post(handlers::like_flame))
        // Featured + stats
        .route("/api/daily-flame", get(handlers::daily_flame))
        .route("/api/stats", get(handlers::stats))
        .layer(middleware::trace_layer())
        .layer(middleware::cors_policy())
        .with_state(state)
}
