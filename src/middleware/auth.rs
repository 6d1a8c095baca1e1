// SPDX-License-Identifier: MIT

//! Session extraction middleware.
//!
//! Sessions are JWTs issued by the external auth service and verified
//! here with its HS256 signing secret. Authentication is optional:
//! readings may be anonymous, so every request gets a `Session` extension
//! that is simply empty when no valid token is present.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "lp_session";

/// JWT claims structure (auth service issue format).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Per-request session; `None` for anonymous requests.
#[derive(Debug, Clone, Default)]
pub struct Session(pub Option<AuthUser>);

impl Session {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

/// Middleware that attaches an optional session to every request.
/// Tries the session cookie first, then a bearer header.
pub async fn session_context(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| {
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(|t| t.to_string())
        });

    let session = token
        .and_then(|t| verify_session_token(&t, &state.config.auth_jwt_secret))
        .map(|user| Session(Some(user)))
        .unwrap_or_default();

    request.extensions_mut().insert(session);
    next.run(request).await
}

/// Decode and verify a session token. Invalid tokens simply yield an
/// anonymous session rather than an error.
fn verify_session_token(token: &str, signing_key: &[u8]) -> Option<AuthUser> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).ok()?;
    let user_id = token_data.claims.sub.parse().ok()?;

    Some(AuthUser { user_id })
}

/// Create a session token the way the auth service does. Used by tests
/// and never on the production issue path (the collaborator issues real
/// tokens).
pub fn create_session_token(user_id: Uuid, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 7 * 24 * 60 * 60, // 7 days
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
