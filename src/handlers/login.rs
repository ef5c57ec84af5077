use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::payload::{LoginRequest, LoginResponse};
use crate::models::user::sanitize;
use crate::utils::auth::verify_password;
use crate::validation::user_input::{json_body, validate_login};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Check a username/password pair
///
/// POST /login  `{username, password}`
///
/// Unknown users and wrong passwords get the same 401 so callers cannot tell
/// which one failed. Inactive users with valid credentials get a 403. Nothing
/// is issued on success; the sanitized user is echoed back.
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let (username, password) = validate_login(json_body(payload)?)?;

    let user = state
        .store
        .find_by_username(&username)
        .await
        .map_err(ApiError::unexpected("Error during login"))?;

    let user = match user {
        Some(user) if verify_password(&user.password, &password) => user,
        _ => {
            warn!(username = %username, "Login rejected: invalid credentials");
            return Err(ApiError::Authentication);
        }
    };

    if !user.is_active {
        warn!(user_id = user.id, "Login rejected: user is not active");
        return Err(ApiError::Forbidden);
    }

    info!(user_id = user.id, "Login successful");

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            user: sanitize(user),
            message: "Login successful".to_string(),
        }),
    )
        .into_response())
}
