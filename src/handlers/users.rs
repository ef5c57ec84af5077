// Collection endpoints: list and create users

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::payload::CreateUserRequest;
use crate::models::user::{sanitize, SanitizedUser};
use crate::validation::user_input::{json_body, validate_new_user};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, info};

/// List every user, without passwords, in store order
///
/// GET /users
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let users = state
        .store
        .find_many()
        .await
        .map_err(ApiError::unexpected("Error fetching users"))?;

    debug!(count = users.len(), "Users listed");

    let users: Vec<SanitizedUser> = users.into_iter().map(sanitize).collect();

    Ok((StatusCode::OK, Json(users)).into_response())
}

/// Create a user
///
/// POST /users  `{email, password, username, isActive?}`
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let new_user = validate_new_user(json_body(payload)?)?;

    let user = state
        .store
        .create(new_user)
        .await
        .map_err(ApiError::unexpected("Error creating user"))?;

    info!(user_id = user.id, username = %user.username, "User created");

    Ok((StatusCode::CREATED, Json(sanitize(user))).into_response())
}
