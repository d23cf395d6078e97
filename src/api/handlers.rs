//! Admin API handlers.

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teloxide::types::ChatId;
use tracing::info;

use super::ApiState;
use super::error::ApiError;
use crate::announce::Trigger;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub bot_status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BotStatusResponse {
    pub status: String,
    pub message: String,
    pub is_running: bool,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TestWelcomeRequest {
    #[serde(alias = "chatId")]
    pub chat_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestWelcomeResponse {
    pub status: String,
    pub message: String,
    pub job_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImagesResponse {
    pub images: Vec<String>,
    pub total_count: usize,
    pub max_images: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn health_response(state: &ApiState, message: &str) -> Json<HealthResponse> {
    let bot_status = if state.status.is_running() { "running" } else { "stopped" };
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: message.to_string(),
        bot_status: bot_status.to_string(),
    })
}

pub async fn root(State(state): State<ApiState>) -> Json<HealthResponse> {
    health_response(&state, "Welcome bot API is running")
}

pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    health_response(&state, "Service is healthy")
}

pub async fn bot_status(State(state): State<ApiState>) -> Json<BotStatusResponse> {
    Json(BotStatusResponse {
        status: "success".to_string(),
        message: "Bot status retrieved successfully".to_string(),
        is_running: state.status.is_running(),
        started_at: state.status.started_at(),
    })
}

/// Queue an announcement; does not wait for it to be sent.
pub async fn test_welcome(
    State(state): State<ApiState>,
    Json(req): Json<TestWelcomeRequest>,
) -> Result<(StatusCode, Json<TestWelcomeResponse>), ApiError> {
    let ticket = state.queue.submit(ChatId(req.chat_id), Trigger::Admin)?;
    info!("Admin API queued test welcome for chat {} (job {})", req.chat_id, ticket.job_id);

    Ok((
        StatusCode::ACCEPTED,
        Json(TestWelcomeResponse {
            status: "accepted".to_string(),
            message: format!("Test welcome message scheduled for chat {}", req.chat_id),
            job_id: ticket.job_id,
        }),
    ))
}

pub async fn images(State(state): State<ApiState>) -> Json<ImagesResponse> {
    let listing = state.announcer.selector().list_names().await;

    Json(ImagesResponse {
        total_count: listing.names.len(),
        max_images: listing.max_images,
        message: (!listing.folder_exists).then(|| "Images folder not found".to_string()),
        images: listing.names,
    })
}

/// Require `Authorization: Bearer <token>` when a token is configured.
pub async fn require_token(State(state): State<ApiState>, req: Request, next: Next) -> Result<Response, ApiError> {
    if let Some(expected) = state.api_token.as_deref() {
        let provided = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        if provided != Some(expected) {
            return Err(ApiError::from_status(StatusCode::UNAUTHORIZED));
        }
    }

    Ok(next.run(req).await)
}
