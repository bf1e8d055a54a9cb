use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validate::ValidationError;

/// Errors crossing the handler boundary. Only the user-safe message of each
/// variant is rendered; sources and transport detail stay in the server log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Email configuration is missing")]
    ConfigMissing,
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("Failed to submit refund application")]
    Delivery(#[source] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::ConfigMissing | ApiError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn config_error_is_a_server_error() {
        let response = ApiError::ConfigMissing.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Email configuration is missing");
    }

    #[tokio::test]
    async fn validation_error_is_a_bad_request_with_field_message() {
        let response = ApiError::from(ValidationError::Cvv).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Please enter a valid CVV (3-4 digits).");
    }

    #[tokio::test]
    async fn delivery_error_never_leaks_transport_detail() {
        let inner = anyhow::anyhow!("550 relay rejected: credentials exposed");
        let response = ApiError::Delivery(inner).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to submit refund application");
    }
}
