//! HTTP API surface.
//!
//! The chat route is the inbound edge of the resilience bridge; everything
//! else (history, resources, anonymous users) is thin collaborator glue
//! around it. Generator trouble never surfaces here as an error status.

use crate::bridge::DispatchBridge;
use crate::database;
use crate::error::AppError;
use crate::models::{GeneratedResponse, Locale, Resource, UserMessage};
use crate::rate_limiter::SharedRateLimiter;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<DispatchBridge>,
    pub pool: SqlitePool,
    pub limiter: SharedRateLimiter,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(service_health))
        .route("/api/chat/message", post(send_message))
        .route("/api/chat/history", get(chat_history))
        .route("/api/resources", get(list_resources))
        .route(
            "/api/resources/category/:category",
            get(resources_by_category),
        )
        .route("/api/user/anonymous", post(create_anonymous_user))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// --- Chat ---

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EchoedMessage {
    text: String,
    sender: &'static str,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BotMessage {
    text: String,
    sender: &'static str,
    timestamp: DateTime<Utc>,
    distress_detected: bool,
    context_used: bool,
    relevant_topics: Vec<String>,
    /// True when the response was synthesized locally.
    fallback: bool,
}

#[derive(Debug, Serialize)]
struct ChatResponseBody {
    message: EchoedMessage,
    response: BotMessage,
}

async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponseBody>, AppError> {
    req.validate()?;

    let identity = req.username.unwrap_or_else(|| "anonymous".to_string());
    if !state.limiter.check(&identity) {
        return Err(AppError::RateLimited);
    }

    let locale = Locale::from_tag(req.language.as_deref().unwrap_or("en"));
    let msg = UserMessage {
        text: req.message.clone(),
        locale,
        identity: identity.clone(),
    };

    let response = state.bridge.respond(&msg).await;
    persist_exchange(&state.pool, &identity, &req.message, &response).await;

    let now = Utc::now();
    Ok(Json(ChatResponseBody {
        message: EchoedMessage {
            text: req.message,
            sender: "user",
            timestamp: now,
        },
        response: BotMessage {
            text: response.text,
            sender: "bot",
            timestamp: now,
            distress_detected: response.distress_detected,
            context_used: response.context_used,
            relevant_topics: response.relevant_topics,
            fallback: response.degraded,
        },
    }))
}

/// History is append-only collaborator state: a write failure is logged and
/// the chat response still goes out.
async fn persist_exchange(
    pool: &SqlitePool,
    identity: &str,
    user_text: &str,
    response: &GeneratedResponse,
) {
    if let Err(e) = database::add_entry(pool, identity, "user", user_text, false).await {
        warn!("Failed to persist user message: {}", e);
    }
    if let Err(e) =
        database::add_entry(pool, identity, "bot", &response.text, response.degraded).await
    {
        warn!("Failed to persist bot response: {}", e);
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub username: Option<String>,
}

async fn chat_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let identity = params.username.unwrap_or_else(|| "anonymous".to_string());
    let history = database::get_history(&state.pool, &identity).await?;
    Ok(Json(serde_json::json!({ "history": history })))
}

// --- Service health ---

async fn service_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.bridge.health().snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "generator": snapshot,
        "degraded": !snapshot.reachable,
    }))
}

// --- Anonymous users ---

#[derive(Debug, Deserialize, Default)]
pub struct AnonymousUserRequest {
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnonymousUser {
    id: String,
    is_anonymous: bool,
    language: String,
    created_at: DateTime<Utc>,
}

async fn create_anonymous_user(
    Json(req): Json<AnonymousUserRequest>,
) -> Json<serde_json::Value> {
    let locale = Locale::from_tag(req.language.as_deref().unwrap_or("en"));
    let user = AnonymousUser {
        id: format!("anon_{}", Uuid::new_v4().simple()),
        is_anonymous: true,
        language: locale.as_tag().to_string(),
        created_at: Utc::now(),
    };
    Json(serde_json::json!({ "user": user }))
}

// --- Resource directory ---

fn resource_directory() -> Vec<Resource> {
    let entries = [
        (1, "Crisis Text Line", "Text HOME to 741741 to connect with a Crisis Counselor", "crisis", "https://www.crisistextline.org/"),
        (2, "National Suicide Prevention Lifeline", "Call 988 or 1-800-273-8255 for 24/7 support", "crisis", "https://suicidepreventionlifeline.org/"),
        (3, "7 Cups", "Free emotional support through online chat", "support", "https://www.7cups.com/"),
        (4, "Headspace", "Meditation and mindfulness app", "self-help", "https://www.headspace.com/"),
        (5, "Calm", "App for sleep, meditation and relaxation", "self-help", "https://www.calm.com/"),
        (6, "MoodGYM", "Interactive self-help program for cognitive behavioral therapy", "self-help", "https://moodgym.com.au/"),
        (7, "Psychology Today", "Find a therapist in your area", "professional", "https://www.psychologytoday.com/us/therapists"),
        (8, "Mental Health America", "Resources and tools for mental health", "education", "https://www.mhanational.org/"),
    ];
    entries
        .into_iter()
        .map(|(id, title, description, category, url)| Resource {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            url: url.to_string(),
        })
        .collect()
}

async fn list_resources() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "resources": resource_directory() }))
}

async fn resources_by_category(Path(category): Path<String>) -> Json<serde_json::Value> {
    let filtered: Vec<Resource> = resource_directory()
        .into_iter()
        .filter(|r| r.category == category)
        .collect();
    Json(serde_json::json!({ "resources": filtered }))
}
