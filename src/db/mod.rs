//! Storage layer.
//!
//! `ReadingStore` is the persistence contract for readings, journal
//! responses, and analytics events. Production uses the Postgres
//! implementation; the in-memory variant exists only as a test double.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{AnalyticsEvent, JournalResponse, ReadingResponse, StoredReading, UserInput};
use async_trait::async_trait;
use uuid::Uuid;

/// Cap for the administrative "list all" query.
pub const LIST_ALL_LIMIT: i64 = 100;

/// Table names as constants.
pub mod tables {
    pub const READINGS: &str = "readings";
    pub const JOURNAL_RESPONSES: &str = "journal_responses";
    pub const ANALYTICS_EVENTS: &str = "analytics_events";
}

/// Persistence contract. All writes are append-only; there is no update
/// or delete operation.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Persist a new reading and return its freshly assigned id.
    /// A regenerate calls this again and gets a brand-new record.
    async fn save_reading(
        &self,
        inputs: &UserInput,
        reading: &ReadingResponse,
        user_id: Option<Uuid>,
    ) -> Result<Uuid, AppError>;

    /// Exact-match lookup. Not-found is a normal outcome, not an error.
    async fn get_reading(&self, reading_id: Uuid) -> Result<Option<StoredReading>, AppError>;

    /// All readings owned by a user, newest first.
    async fn list_readings_for_user(&self, user_id: Uuid) -> Result<Vec<StoredReading>, AppError>;

    /// Administrative listing, newest first, capped at [`LIST_ALL_LIMIT`].
    async fn list_all_readings(&self) -> Result<Vec<StoredReading>, AppError>;

    /// Persist a journal follow-up outcome.
    async fn save_journal_response(&self, response: &JournalResponse) -> Result<(), AppError>;

    /// Append one analytics event. Callers treat failures as best-effort;
    /// the recorder swallows and logs them.
    async fn insert_analytics_event(&self, event: &AnalyticsEvent) -> Result<(), AppError>;
}
