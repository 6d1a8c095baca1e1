// SPDX-License-Identifier: MIT

//! Life-Pattern Insights: reflective readings from a simple form.
//!
//! This crate provides the backend API that turns a form submission into
//! a generated "reflection" reading via an OpenAI-compatible completion
//! API, persists it, and serves it back with an optional journal
//! follow-up.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::ReadingStore;
use services::{AnalyticsRecorder, AuthClient, OpenAiClient};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Arc<dyn ReadingStore>,
    pub openai: OpenAiClient,
    pub auth: AuthClient,
    pub analytics: AnalyticsRecorder,
}
