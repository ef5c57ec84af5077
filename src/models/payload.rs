use crate::models::user::SanitizedUser;
use serde::{Deserialize, Serialize};

/// POST /users body. Every field is optional at the wire level so that a
/// missing field is reported as a validation error instead of a rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    pub is_active: Option<bool>,
}

/// POST /login body
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: SanitizedUser,
    pub message: String,
}

/// Body for confirmations and for every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
