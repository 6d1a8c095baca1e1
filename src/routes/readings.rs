// SPDX-License-Identifier: MIT

//! Reading generation and retrieval routes.
//!
//! The generation pipeline is strictly sequential within a request:
//! validate, build prompts, call the completion API, parse, store. Each
//! stage fails the whole request with its own error; analytics are
//! attached as detached side effects at the milestones.

use crate::error::{AppError, Result};
use crate::middleware::auth::Session;
use crate::models::{AnalyticsEventType, StoredReading, UserInput};
use crate::services::{parse::parse_reading_response, prompts};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-reading", post(generate_reading))
        .route("/result", get(get_result))
        .route("/my-readings", get(my_readings))
        .route("/admin/readings", get(all_readings))
}

#[derive(Deserialize)]
struct GenerateReadingRequest {
    #[serde(flatten)]
    input: UserInput,
    /// True when re-running the same inputs from an existing reading.
    #[serde(default)]
    regenerate: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReadingResponse {
    pub reading_id: Uuid,
}

/// Generate a reading and return its fresh id.
async fn generate_reading(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(request): Json<GenerateReadingRequest>,
) -> Result<Json<GenerateReadingResponse>> {
    let user_id = session.user_id();
    tracing::debug!(authenticated = user_id.is_some(), "Generating reading");

    let input = request.input.validated()?;

    let system = prompts::reading_system_prompt();
    let user = prompts::reading_user_prompt(&input);
    let raw = state.openai.chat_json(system, &user).await?;
    let reading = parse_reading_response(&raw)?;

    let reading_id = state.db.save_reading(&input, &reading, user_id).await?;

    let event_type = if request.regenerate {
        AnalyticsEventType::ReadingRegenerated
    } else {
        AnalyticsEventType::ReadingGenerated
    };
    state
        .analytics
        .record(event_type, Some(reading_id), user_id, None);

    tracing::info!(reading_id = %reading_id, "Reading generated");
    Ok(Json(GenerateReadingResponse { reading_id }))
}

#[derive(Deserialize)]
struct ResultQuery {
    rid: Option<String>,
}

/// Fetch a stored reading by id. Unknown or missing ids render as
/// not-found, never as a server error.
async fn get_result(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ResultQuery>,
) -> Result<Json<StoredReading>> {
    let not_found = || AppError::NotFound("Reading not found".to_string());

    let reading_id: Uuid = params
        .rid
        .as_deref()
        .and_then(|rid| rid.parse().ok())
        .ok_or_else(not_found)?;

    let stored = state
        .db
        .get_reading(reading_id)
        .await?
        .ok_or_else(not_found)?;

    state.analytics.record(
        AnalyticsEventType::ReadingViewed,
        Some(reading_id),
        session.user_id(),
        None,
    );

    Ok(Json(stored))
}

#[derive(Serialize)]
pub struct ReadingListResponse {
    pub readings: Vec<StoredReading>,
}

/// List the session user's readings, newest first.
async fn my_readings(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<ReadingListResponse>> {
    let user_id = session.user_id().ok_or(AppError::Unauthorized)?;

    let readings = state.db.list_readings_for_user(user_id).await?;
    Ok(Json(ReadingListResponse { readings }))
}

/// Administrative listing, capped at 100 records.
async fn all_readings(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<ReadingListResponse>> {
    if session.user_id().is_none() {
        return Err(AppError::Unauthorized);
    }

    let readings = state.db.list_all_readings().await?;
    Ok(Json(ReadingListResponse { readings }))
}
