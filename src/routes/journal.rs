// SPDX-License-Identifier: MIT

//! Journal follow-up routes.
//!
//! Accepting a prompt runs the smaller free-text completion call and
//! persists the outcome; rejecting only records the analytics event.

use crate::error::{AppError, Result};
use crate::middleware::auth::Session;
use crate::models::{AnalyticsEventType, JournalResponse, UserInput};
use crate::services::prompts;
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/answer-prompt", post(answer_prompt))
        .route("/reject-prompt", post(reject_prompt))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerPromptRequest {
    journal_prompt: String,
    user_inputs: Option<UserInput>,
    reading_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct AnswerPromptResponse {
    pub answer: String,
}

/// Accept a journal prompt: generate an answer, record the acceptance,
/// and persist the outcome when the reading is known.
async fn answer_prompt(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(request): Json<AnswerPromptRequest>,
) -> Result<Json<AnswerPromptResponse>> {
    if request.journal_prompt.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "journalPrompt: Journal prompt is required".to_string(),
        ));
    }

    let system = prompts::journal_system_prompt();
    let user = prompts::journal_user_prompt(&request.journal_prompt, request.user_inputs.as_ref());
    let answer = state.openai.chat_text(system, &user).await?;

    state.analytics.record(
        AnalyticsEventType::PromptAccepted,
        request.reading_id,
        session.user_id(),
        None,
    );

    // The journal row references a reading; an unknown or forged id is
    // treated like no id at all rather than failing the answer.
    if let Some(reading_id) = request.reading_id {
        if state.db.get_reading(reading_id).await?.is_some() {
            let response = JournalResponse {
                reading_id,
                prompt_text: request.journal_prompt.clone(),
                accepted: true,
                answer: Some(answer.clone()),
                created_at: chrono::Utc::now(),
            };
            state.db.save_journal_response(&response).await?;
        } else {
            tracing::debug!(reading_id = %reading_id, "Reading not found, skipping journal persistence");
        }
    }

    tracing::info!(reading_id = ?request.reading_id, "Journal prompt answered");
    Ok(Json(AnswerPromptResponse { answer }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RejectPromptRequest {
    #[allow(dead_code)]
    journal_prompt: Option<String>,
    reading_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct RejectPromptResponse {
    pub ok: bool,
}

/// Decline a journal prompt. Terminal; only the analytics event is kept.
async fn reject_prompt(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(request): Json<RejectPromptRequest>,
) -> Result<Json<RejectPromptResponse>> {
    state.analytics.record(
        AnalyticsEventType::PromptRejected,
        request.reading_id,
        session.user_id(),
        None,
    );

    Ok(Json(RejectPromptResponse { ok: true }))
}
