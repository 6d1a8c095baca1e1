// SPDX-License-Identifier: MIT

//! In-memory `ReadingStore` test double.
//!
//! Never a production path. Exists so the router and services can be
//! exercised without a database; the extra accessors let tests inspect
//! journal responses and analytics events after a request.

use crate::db::{ReadingStore, LIST_ALL_LIMIT};
use crate::error::AppError;
use crate::models::{AnalyticsEvent, JournalResponse, ReadingResponse, StoredReading, UserInput};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    readings: HashMap<Uuid, StoredReading>,
    journal_responses: Vec<JournalResponse>,
    events: Vec<AnalyticsEvent>,
}

/// In-memory store, keyed by reading id.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    /// When true, every operation fails with a storage error.
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent operations fail, to exercise storage error paths.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    fn check_failure(&self) -> Result<(), AppError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(AppError::Storage("injected failure".to_string()));
        }
        Ok(())
    }

    /// Snapshot of recorded analytics events.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.inner.lock().unwrap().events.clone()
    }

    /// Snapshot of persisted journal responses.
    pub fn journal_responses(&self) -> Vec<JournalResponse> {
        self.inner.lock().unwrap().journal_responses.clone()
    }

    /// Number of stored readings.
    pub fn reading_count(&self) -> usize {
        self.inner.lock().unwrap().readings.len()
    }
}

#[async_trait]
impl ReadingStore for MemoryStore {
    async fn save_reading(
        &self,
        inputs: &UserInput,
        reading: &ReadingResponse,
        user_id: Option<Uuid>,
    ) -> Result<Uuid, AppError> {
        self.check_failure()?;
        let reading_id = Uuid::new_v4();
        let stored = StoredReading {
            reading_id,
            inputs: inputs.clone(),
            reading: reading.clone(),
            created_at: chrono::Utc::now(),
            user_id,
        };
        self.inner.lock().unwrap().readings.insert(reading_id, stored);
        Ok(reading_id)
    }

    async fn get_reading(&self, reading_id: Uuid) -> Result<Option<StoredReading>, AppError> {
        self.check_failure()?;
        Ok(self.inner.lock().unwrap().readings.get(&reading_id).cloned())
    }

    async fn list_readings_for_user(&self, user_id: Uuid) -> Result<Vec<StoredReading>, AppError> {
        self.check_failure()?;
        let mut readings: Vec<StoredReading> = self
            .inner
            .lock()
            .unwrap()
            .readings
            .values()
            .filter(|r| r.user_id == Some(user_id))
            .cloned()
            .collect();
        readings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(readings)
    }

    async fn list_all_readings(&self) -> Result<Vec<StoredReading>, AppError> {
        self.check_failure()?;
        let mut readings: Vec<StoredReading> =
            self.inner.lock().unwrap().readings.values().cloned().collect();
        readings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        readings.truncate(LIST_ALL_LIMIT as usize);
        Ok(readings)
    }

    async fn save_journal_response(&self, response: &JournalResponse) -> Result<(), AppError> {
        self.check_failure()?;
        let mut inner = self.inner.lock().unwrap();
        // Same referential rule as the schema: the reading must exist.
        if !inner.readings.contains_key(&response.reading_id) {
            return Err(AppError::Storage(format!(
                "journal response references unknown reading {}",
                response.reading_id
            )));
        }
        inner.journal_responses.push(response.clone());
        Ok(())
    }

    async fn insert_analytics_event(&self, event: &AnalyticsEvent) -> Result<(), AppError> {
        self.check_failure()?;
        self.inner.lock().unwrap().events.push(event.clone());
        Ok(())
    }
}
