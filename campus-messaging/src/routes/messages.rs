use axum::extract::rejection::{QueryRejection, StringRejection};
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::{Validate, ValidationError};

use campus_shared::errors::{AppError, AppResult};

use crate::models::DirectMessage;
use crate::store::Store;
use crate::AppState;

// --- Request DTOs ---

#[derive(Debug, Deserialize, Validate)]
pub struct BetweenParams {
    #[serde(default)]
    #[validate(custom = "not_blank")]
    pub username1: String,
    #[serde(default)]
    #[validate(custom = "not_blank")]
    pub username2: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendParams {
    #[serde(default)]
    #[validate(custom = "not_blank")]
    pub from_username: String,
    #[serde(default)]
    #[validate(custom = "not_blank")]
    pub to_username: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

// --- Response DTOs ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub from_username: String,
    pub to_username: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

impl From<DirectMessage> for MessageResponse {
    fn from(message: DirectMessage) -> Self {
        Self {
            id: message.id,
            from_username: message.sender,
            to_username: message.recipient,
            timestamp: message.sent_at,
            content: message.content,
        }
    }
}

// --- Handlers ---

/// GET /api/messages/between?username1=&username2= - conversation history, oldest first
pub async fn get_messages_between<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<BetweenParams>, QueryRejection>,
) -> AppResult<Json<Vec<MessageResponse>>> {
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let items = state
        .messages
        .conversation(&params.username1, &params.username2)?
        .into_iter()
        .map(MessageResponse::from)
        .collect();

    Ok(Json(items))
}

/// POST /api/messages/send?fromUsername=&toUsername= - raw request body is the message content
pub async fn send_message<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<SendParams>, QueryRejection>,
    body: Result<String, StringRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let content = body.map_err(|e| AppError::Validation(e.body_text()))?;
    if content.is_empty() {
        return Err(AppError::Validation("message content is required".into()));
    }

    let message = state
        .messages
        .send(&params.from_username, &params.to_username, &content)?;

    Ok(Json(MessageResponse::from(message)))
}
