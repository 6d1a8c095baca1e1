// SPDX-License-Identifier: MIT

//! Analytics event models. Write-only, append-only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed enumeration of tracked events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventType {
    ReadingGenerated,
    ReadingViewed,
    ReadingRegenerated,
    PromptAccepted,
    PromptRejected,
    UserSignup,
    UserLogin,
}

impl AnalyticsEventType {
    /// Stable string form used as the `event_type` column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEventType::ReadingGenerated => "reading_generated",
            AnalyticsEventType::ReadingViewed => "reading_viewed",
            AnalyticsEventType::ReadingRegenerated => "reading_regenerated",
            AnalyticsEventType::PromptAccepted => "prompt_accepted",
            AnalyticsEventType::PromptRejected => "prompt_rejected",
            AnalyticsEventType::UserSignup => "user_signup",
            AnalyticsEventType::UserLogin => "user_login",
        }
    }
}

/// One event row. The timestamp is assigned by the store on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event_type: AnalyticsEventType,
    pub reading_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub metadata: Option<serde_json::Value>,
}
