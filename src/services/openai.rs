// SPDX-License-Identifier: MIT

//! Client for an OpenAI-compatible chat completion API.
//!
//! Constructed once from process configuration and passed in explicitly;
//! there is no lazy module-level singleton. Two call profiles exist:
//! low-temperature structured JSON for the main reading, and a capped
//! free-text call for journal answers.

use crate::config::Config;
use crate::error::AppError;
use serde::Deserialize;
use std::time::Duration;

const READING_TEMPERATURE: f32 = 0.2;
const JOURNAL_TEMPERATURE: f32 = 0.7;
const JOURNAL_MAX_TOKENS: u32 = 500;

/// Decoding parameters for one completion call.
struct CallProfile {
    temperature: f32,
    max_tokens: Option<u32>,
    json_mode: bool,
}

/// Completion API client.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a client from configuration.
    ///
    /// Fails fast with a configuration error when no credential is set,
    /// before any network attempt is possible.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        if config.openai_api_key.is_empty() {
            return Err(AppError::Configuration(
                "OPENAI_API_KEY is required but not set".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.openai_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        })
    }

    /// One low-randomness completion in structured JSON mode.
    /// Used for the main reading.
    pub async fn chat_json(&self, system: &str, user: &str) -> Result<String, AppError> {
        self.chat(
            system,
            user,
            CallProfile {
                temperature: READING_TEMPERATURE,
                max_tokens: None,
                json_mode: true,
            },
        )
        .await
    }

    /// One higher-randomness free-text completion with a response cap.
    /// Used for journal answers.
    pub async fn chat_text(&self, system: &str, user: &str) -> Result<String, AppError> {
        self.chat(
            system,
            user,
            CallProfile {
                temperature: JOURNAL_TEMPERATURE,
                max_tokens: Some(JOURNAL_MAX_TOKENS),
                json_mode: false,
            },
        )
        .await
    }

    async fn chat(
        &self,
        system: &str,
        user: &str,
        profile: CallProfile,
    ) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": profile.temperature,
        });
        if profile.json_mode {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
            body["top_p"] = serde_json::json!(1);
        }
        if let Some(max_tokens) = profile.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Generation(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!("HTTP {}: {}", status, body)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("Invalid completion response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty());

        content.ok_or_else(|| AppError::Generation("No content in completion response".to_string()))
    }
}
