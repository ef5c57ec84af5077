// Single-user endpoints addressed by numeric id

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::payload::MessageResponse;
use crate::models::user::sanitize;
use crate::stores::StoreError;
use crate::validation::user_input::{extract_changes, json_body, parse_user_id};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Fetch one user
///
/// GET /users/{id}
pub async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_user_id(&raw_id)?
        .into_key()
        .map_err(ApiError::unexpected("Error fetching user"))?;

    let user = state
        .store
        .find_by_id(id)
        .await
        .map_err(ApiError::unexpected("Error fetching user"))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok((StatusCode::OK, Json(sanitize(user))).into_response())
}

/// Partially update one user
///
/// PUT /users/{id}  `{email?, password?, username?, isActive?}`
///
/// An unknown or non-integral id is reported as a 500 like any other store
/// failure, but only after the body has been checked.
pub async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_user_id(&raw_id)?;
    let changes = extract_changes(&json_body(payload)?)?;

    let id = id
        .into_key()
        .map_err(ApiError::unexpected("Error updating user"))?;

    let user = state
        .store
        .update(id, changes)
        .await
        .map_err(|e| {
            log_missing(&e, "update");
            ApiError::unexpected("Error updating user")(e)
        })?;

    info!(user_id = user.id, "User updated");

    Ok((StatusCode::OK, Json(sanitize(user))).into_response())
}

/// Delete one user
///
/// DELETE /users/{id}
///
/// An unknown or non-integral id is reported as a 500 like any other store failure.
pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_user_id(&raw_id)?
        .into_key()
        .map_err(ApiError::unexpected("Error deleting user"))?;

    state.store.delete(id).await.map_err(|e| {
        log_missing(&e, "delete");
        ApiError::unexpected("Error deleting user")(e)
    })?;

    info!(user_id = id, "User deleted");

    Ok((StatusCode::OK, Json(MessageResponse::new("User deleted"))).into_response())
}

fn log_missing(err: &StoreError, operation: &str) {
    if let StoreError::NotFound(id) = err {
        warn!(user_id = *id, operation = operation, "Write against unknown user id");
    }
}
