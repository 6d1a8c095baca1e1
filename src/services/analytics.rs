// SPDX-License-Identifier: MIT

//! Fire-and-forget analytics recorder.
//!
//! Writes go through the store on a detached task so they can never
//! block or fail the caller's primary operation. Failures are logged
//! at warn and discarded.

use crate::db::ReadingStore;
use crate::models::{AnalyticsEvent, AnalyticsEventType};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AnalyticsRecorder {
    store: Arc<dyn ReadingStore>,
}

impl AnalyticsRecorder {
    pub fn new(store: Arc<dyn ReadingStore>) -> Self {
        Self { store }
    }

    /// Record one event, best-effort.
    pub fn record(
        &self,
        event_type: AnalyticsEventType,
        reading_id: Option<Uuid>,
        user_id: Option<Uuid>,
        metadata: Option<serde_json::Value>,
    ) {
        let store = self.store.clone();
        let event = AnalyticsEvent {
            event_type,
            reading_id,
            user_id,
            metadata,
        };

        tokio::spawn(async move {
            if let Err(e) = store.insert_analytics_event(&event).await {
                tracing::warn!(
                    error = %e,
                    event_type = event.event_type.as_str(),
                    "Failed to record analytics event"
                );
            }
        });
    }
}
