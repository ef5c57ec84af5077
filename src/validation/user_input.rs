use crate::core::error::ApiError;
use crate::models::payload::{CreateUserRequest, LoginRequest};
use crate::models::user::{NewUser, UserChanges};
use crate::stores::StoreError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;
use tracing::debug;

pub const INVALID_JSON_BODY: &str = "Invalid JSON body";
pub const INVALID_USER_ID: &str = "Invalid user id";
pub const CREATE_FIELDS_REQUIRED: &str = "email, password and username are required";
pub const NO_VALID_UPDATE_FIELDS: &str = "No valid fields provided for update";
pub const LOGIN_FIELDS_REQUIRED: &str = "username and password are required";

/// Unwrap an optional JSON extraction, turning a rejection into a validation error
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Rejected request body");
            Err(ApiError::validation(INVALID_JSON_BODY))
        }
    }
}

/// A numeric `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserId {
    /// Whole number within the id range
    Key(i64),
    /// A number no stored user can have, such as `1.5` or `1e30`
    Unaddressable(f64),
}

impl UserId {
    /// The store key, or a store failure for numbers that cannot be ids
    pub fn into_key(self) -> Result<i64, StoreError> {
        match self {
            UserId::Key(id) => Ok(id),
            UserId::Unaddressable(value) => Err(StoreError::InvalidId(value.to_string())),
        }
    }
}

/// Parse the `{id}` path segment as a number.
///
/// Only text that is not a number at all is rejected here. `1.0` and `1e0`
/// both address user 1; other numbers pass the guard and fail at the store.
pub fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
        .ok_or_else(|| ApiError::validation(INVALID_USER_ID))?;

    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Ok(UserId::Key(value as i64))
    } else {
        Ok(UserId::Unaddressable(value))
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Check the create payload. `isActive` defaults to true.
pub fn validate_new_user(request: CreateUserRequest) -> Result<NewUser, ApiError> {
    match (
        present(request.email),
        present(request.password),
        present(request.username),
    ) {
        (Some(email), Some(password), Some(username)) => Ok(NewUser {
            email,
            password,
            username,
            is_active: request.is_active.unwrap_or(true),
        }),
        _ => Err(ApiError::validation(CREATE_FIELDS_REQUIRED)),
    }
}

/// Build the update set from an arbitrary JSON body.
///
/// Only `email`, `password` and `username` as strings and `isActive` as a
/// boolean are taken; unknown or mistyped fields are dropped silently.
pub fn extract_changes(body: &Value) -> Result<UserChanges, ApiError> {
    let string_field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);

    let changes = UserChanges {
        email: string_field("email"),
        password: string_field("password"),
        username: string_field("username"),
        is_active: body.get("isActive").and_then(Value::as_bool),
    };

    if changes.is_empty() {
        return Err(ApiError::validation(NO_VALID_UPDATE_FIELDS));
    }

    Ok(changes)
}

/// Check the login payload and return `(username, password)`
pub fn validate_login(request: LoginRequest) -> Result<(String, String), ApiError> {
    match (present(request.username), present(request.password)) {
        (Some(username), Some(password)) => Ok((username, password)),
        _ => Err(ApiError::validation(LOGIN_FIELDS_REQUIRED)),
    }
}
