// SPDX-License-Identifier: MIT

//! Journal follow-up models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a user's interaction with a reading's journal prompt.
/// Created once per interaction; never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalResponse {
    pub reading_id: Uuid,
    /// The reflective question the user was shown.
    pub prompt_text: String,
    /// Whether the user chose to explore the prompt.
    pub accepted: bool,
    /// Generated answer text; present only when accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub created_at: DateTime<Utc>,
}
