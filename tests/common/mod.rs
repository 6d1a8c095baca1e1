// SPDX-License-Identifier: MIT

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use lifepattern::config::Config;
use lifepattern::db::MemoryStore;
use lifepattern::models::AnalyticsEvent;
use lifepattern::services::{AnalyticsRecorder, AuthClient, OpenAiClient};
use lifepattern::AppState;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

/// Test app wired to the in-memory store double and mock HTTP endpoints.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub store: Arc<MemoryStore>,
    pub config: Config,
}

/// Create a test app. `openai_base_url` and `auth_base_url` usually
/// point at a mockito server.
#[allow(dead_code)]
pub fn create_test_app(openai_base_url: &str, auth_base_url: &str) -> TestApp {
    let mut config = Config::test_default();
    config.openai_base_url = openai_base_url.to_string();
    config.auth_base_url = auth_base_url.to_string();

    let store = Arc::new(MemoryStore::new());
    let openai = OpenAiClient::new(&config).expect("completion client");
    let auth = AuthClient::new(&config);
    let analytics = AnalyticsRecorder::new(store.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        db: store.clone(),
        openai,
        auth,
        analytics,
    });

    TestApp {
        router: lifepattern::routes::create_router(state.clone()),
        state,
        store,
        config,
    }
}

/// A well-formed reading payload matching the seven-key contract.
#[allow(dead_code)]
pub fn reading_json() -> serde_json::Value {
    serde_json::json!({
        "headline": "A week for noticing what drains you",
        "coreTheme": "You carry a lot quietly. You're not behind, you're overloaded.",
        "strengths": ["Steady under pressure", "Curious about people", "Loyal to commitments"],
        "watchOuts": ["Taking on others' worries", "Harsh self-talk"],
        "next7Days": ["Notice energy dips", "Name one worry out loud", "Protect one quiet hour"],
        "journalPrompt": "What feels heavier than it needs to be?",
        "disclaimer": "This is a lens, not a rule; you decide what matters."
    })
}

/// Wrap completion content in the chat-completions response envelope.
#[allow(dead_code)]
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
    .to_string()
}

/// Valid form input for Ada.
#[allow(dead_code)]
pub fn ada_input() -> serde_json::Value {
    serde_json::json!({
        "name": "Ada",
        "birthDate": "1990-01-01",
        "birthCity": "London, UK"
    })
}

/// Store a reading directly and return its id, for tests that need an
/// existing reading without going through the generation route.
#[allow(dead_code)]
pub async fn seed_reading(store: &MemoryStore, user_id: Option<Uuid>) -> Uuid {
    use lifepattern::db::ReadingStore;
    use lifepattern::models::{ReadingResponse, UserInput};

    let inputs: UserInput = serde_json::from_value(ada_input()).unwrap();
    let reading: ReadingResponse = serde_json::from_value(reading_json()).unwrap();
    store.save_reading(&inputs, &reading, user_id).await.unwrap()
}

/// POST a JSON body and return the response.
#[allow(dead_code)]
pub async fn post_json(
    router: &Router,
    uri: &str,
    body: &serde_json::Value,
    bearer: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    router
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// GET a path and return the response.
#[allow(dead_code)]
pub async fn get(router: &Router, uri: &str, bearer: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Wait for the detached analytics writes to land.
#[allow(dead_code)]
pub async fn wait_for_events(store: &MemoryStore, count: usize) -> Vec<AnalyticsEvent> {
    for _ in 0..200 {
        let events = store.events();
        if events.len() >= count {
            return events;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    store.events()
}

/// Create a session token the way the auth collaborator would.
#[allow(dead_code)]
pub fn create_test_session(user_id: Uuid, config: &Config) -> String {
    lifepattern::middleware::auth::create_session_token(user_id, &config.auth_jwt_secret)
        .expect("session token")
}
