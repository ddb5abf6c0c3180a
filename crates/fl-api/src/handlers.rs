//! # fl-api Handlers
//!
//! This module coordinates the flow between HTTP requests and core traits.
//! Validation happens here, through `fl_core::validate`, before storage is
//! touched; the store only ever answers NotFound.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use fl_core::models::{FlameUpdate, GenerationUpdate, NewFlame, NewGeneration};
use fl_core::validate;

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl Pagination {
    fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

// ── Generation ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub mode: String,
    #[serde(default)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub content: String,
    pub generation_id: i64,
}

/// Asks the upstream generator for a line, then records the attempt.
/// The generation is only stored once the external call has succeeded.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<GenerateResponse> {
    let mode = validate::generation_mode(&req.mode)?;
    let content = state.generator.generate(mode, req.input.as_deref()).await?;

    let generation = state
        .store
        .create_generation(NewGeneration {
            mode: mode.to_string(),
            input: req.input,
            output: content.clone(),
        })
        .await?;

    tracing::info!(id = generation.id, %mode, "generated flame");
    Ok(Json(GenerateResponse {
        success: true,
        content,
        generation_id: generation.id,
    }))
}

pub async fn list_generations(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Value> {
    let generations = state.store.list_generations(page.limit, page.offset()).await?;
    Ok(Json(json!({ "generations": generations })))
}

pub async fn get_generation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    let generation = state.store.get_generation(id).await?;
    Ok(Json(json!({ "generation": generation })))
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: i32,
}

pub async fn rate_generation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RateRequest>,
) -> ApiResult<Value> {
    validate::rating(req.rating)?;
    let generation = state
        .store
        .update_generation(
            id,
            GenerationUpdate {
                rating: Some(req.rating),
            },
        )
        .await?;
    Ok(Json(json!({ "success": true, "generation": generation })))
}

// ── Flames ──────────────────────────────────────────────────────────────────

/// Community submission. The flame lands unapproved and waits for a
/// moderator before showing up in the public listing.
pub async fn submit_flame(
    State(state): State<AppState>,
    Json(req): Json<NewFlame>,
) -> ApiResult<Value> {
    validate::new_flame(&req)?;
    let flame = state.store.create_flame(req).await?;
    tracing::info!(id = flame.id, mode = %flame.mode, "flame submitted for review");
    Ok(Json(json!({
        "success": true,
        "message": "Your flame has been submitted for review!",
        "flame": {
            "id": flame.id,
            "content": flame.content,
            "mode": flame.mode,
        },
    })))
}

/// The public listing: approved flames only, most liked first.
pub async fn list_approved_flames(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Value> {
    let flames = state
        .store
        .list_approved_flames(page.limit, page.offset())
        .await?;
    Ok(Json(json!({ "flames": flames })))
}

/// Moderation view: every flame, newest first, approved or not.
pub async fn list_all_flames(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Value> {
    let flames = state.store.list_flames(page.limit, page.offset()).await?;
    Ok(Json(json!({ "flames": flames })))
}

pub async fn get_flame(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Value> {
    let flame = state.store.get_flame(id).await?;
    Ok(Json(json!({ "flame": flame })))
}

/// Partial update; the moderation path for approving a flame or promoting
/// it to daily.
pub async fn update_flame(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(updates): Json<FlameUpdate>,
) -> ApiResult<Value> {
    validate::flame_update(&updates)?;
    let flame = state.store.update_flame(id, updates).await?;
    Ok(Json(json!({ "success": true, "flame": flame })))
}

pub async fn like_flame(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Value> {
    let flame = state.store.like_flame(id).await?;
    Ok(Json(json!({ "success": true, "likes": flame.likes })))
}

pub async fn daily_flame(State(state): State<AppState>) -> ApiResult<Value> {
    let flame = state.store.get_daily_flame().await?;
    Ok(Json(json!({ "flame": flame })))
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<Value> {
    let stats = state.store.stats().await?;
    Ok(Json(json!({ "stats": stats })))
}
