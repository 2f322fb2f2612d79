use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use campus_shared::errors::{AppError, AppResult};

use crate::models::User;
use crate::store::Store;
use crate::AppState;

/// GET /api/users/exists/:username
pub async fn user_exists<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<bool>> {
    let Path(username) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Json(state.users.exists(&username)?))
}

/// GET /api/users/:username - public profile, password is never serialized
pub async fn get_user<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<User>> {
    let Path(username) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Json(state.users.find(&username)?))
}
