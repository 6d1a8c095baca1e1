// SPDX-License-Identifier: MIT

//! Auth routes. Thin delegation to the external auth service: this
//! layer exchanges credentials or authorization codes for sessions,
//! sets the session cookie, and records signup/login analytics.

use crate::error::Result;
use crate::middleware::auth::SESSION_COOKIE;
use crate::models::AnalyticsEventType;
use crate::services::AuthSession;
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/login", post(sign_in))
        .route("/auth/logout", post(sign_out))
        .route("/auth/callback", get(auth_callback))
}

#[derive(Deserialize)]
struct CredentialsRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn session_cookie(session: &AuthSession) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.access_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Create an account with the auth service and start a session.
async fn sign_up(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let session = state
        .auth
        .sign_up(&request.email, &request.password)
        .await?;

    state.analytics.record(
        AnalyticsEventType::UserSignup,
        None,
        Some(session.user.id),
        None,
    );

    tracing::info!(user_id = %session.user.id, "User signed up");
    let jar = jar.add(session_cookie(&session));
    Ok((
        jar,
        Json(SessionResponse {
            user_id: session.user.id,
            email: session.user.email,
        }),
    ))
}

/// Exchange credentials for a session.
async fn sign_in(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<CredentialsRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let session = state
        .auth
        .sign_in(&request.email, &request.password)
        .await?;

    state.analytics.record(
        AnalyticsEventType::UserLogin,
        None,
        Some(session.user.id),
        None,
    );

    tracing::info!(user_id = %session.user.id, "User signed in");
    let jar = jar.add(session_cookie(&session));
    Ok((
        jar,
        Json(SessionResponse {
            user_id: session.user.id,
            email: session.user.email,
        }),
    ))
}

#[derive(Serialize)]
pub struct SignOutResponse {
    pub ok: bool,
}

/// End the session. The upstream sign-out is best-effort; the cookie is
/// cleared either way.
async fn sign_out(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<SignOutResponse>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = state.auth.sign_out(cookie.value()).await {
            tracing::warn!(error = %e, "Upstream sign-out failed, clearing cookie anyway");
        }
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (jar, Json(SignOutResponse { ok: true }))
}

#[derive(Deserialize)]
struct CallbackParams {
    code: Option<String>,
}

/// OAuth/email-confirmation callback: exchange the opaque code for a
/// session and redirect home with the code dropped from the URL.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    let home = Redirect::temporary(&state.config.frontend_url);

    let Some(code) = params.code else {
        return Ok((jar, home));
    };

    let session = state.auth.exchange_code(&code).await?;
    tracing::info!(user_id = %session.user.id, "Authorization code exchanged");

    let jar = jar.add(session_cookie(&session));
    Ok((jar, home))
}
