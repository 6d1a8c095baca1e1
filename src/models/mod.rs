// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod analytics;
pub mod journal;
pub mod reading;

pub use analytics::{AnalyticsEvent, AnalyticsEventType};
pub use journal::JournalResponse;
pub use reading::{ReadingResponse, StoredReading, UserInput};
