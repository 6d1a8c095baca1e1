// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod analytics;
pub mod auth;
pub mod journal;
pub mod openai;
pub mod parse;
pub mod prompts;

pub use analytics::AnalyticsRecorder;
pub use auth::{AuthClient, AuthSession};
pub use journal::JournalFlow;
pub use openai::OpenAiClient;
