// SPDX-License-Identifier: MIT

//! Thin client for the external auth collaborator (GoTrue-style API).
//!
//! Account state, password handling, and session issuance all live in
//! that service; this client only exchanges credentials or authorization
//! codes for sessions and forwards sign-outs.

use crate::config::Config;
use crate::error::AppError;
use serde::Deserialize;
use uuid::Uuid;

/// Auth service client.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

/// A session issued by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUserProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.auth_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create an account and return the initial session.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let url = format!("{}/signup", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });
        self.post_json(&url, &body).await
    }

    /// Exchange credentials for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let url = format!("{}/token?grant_type=password", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });
        self.post_json(&url, &body).await
    }

    /// Exchange an opaque authorization code for a session.
    pub async fn exchange_code(&self, code: &str) -> Result<AuthSession, AppError> {
        let url = format!("{}/token?grant_type=pkce", self.base_url);
        let body = serde_json::json!({ "auth_code": code });
        self.post_json(&url, &body).await
    }

    /// Invalidate a session. Best-effort on the caller's side.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let url = format!("{}/logout", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::AuthApi(format!("Sign-out request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AuthApi(format!("HTTP {}: {}", status, body)));
        }
        Ok(())
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<AuthSession, AppError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::AuthApi(format!("Auth request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AuthApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::AuthApi(format!("Invalid auth response: {}", e)))
    }
}
