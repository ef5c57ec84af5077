// Centralized error handling for the user endpoints

use crate::models::payload::MessageResponse;
use crate::stores::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const USER_NOT_ACTIVE: &str = "User is not active";

/// Errors a request handler can end with. Each maps to one status code and a
/// `{"message": ...}` body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing input; the store is never reached
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    Authentication,

    #[error("User is not active")]
    Forbidden,

    /// Anything else. Only `context` is sent to the client.
    #[error("{context}")]
    Unexpected {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Build a mapper for store failures, for use with `map_err`
    pub fn unexpected(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Unexpected { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Authentication => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Unexpected { context, source } = &self {
            error!(error = %source, "{}", context);
        }

        (self.status(), Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn message_of(response: Response) -> String {
        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        let message: MessageResponse = serde_json::from_slice(&bytes).unwrap();
        message.message
    }

    #[tokio::test]
    async fn test_status_mapping() {
        assert_eq!(
            ApiError::validation("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("User not found".to_string())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Authentication.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[tokio::test]
    async fn test_unexpected_hides_source() {
        let err = ApiError::unexpected("Error creating user")(StoreError::Conflict(
            "username".to_string(),
        ));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message_of(response).await, "Error creating user");
    }

    #[tokio::test]
    async fn test_login_messages() {
        assert_eq!(
            message_of(ApiError::Authentication.into_response()).await,
            INVALID_CREDENTIALS
        );
        assert_eq!(
            message_of(ApiError::Forbidden.into_response()).await,
            USER_NOT_ACTIVE
        );
    }
}
