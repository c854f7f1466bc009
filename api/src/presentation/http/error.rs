use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::application::ports::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("invalid or missing credentials")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized => "unauthorized",
            ApiError::NotFound => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

/// JSON error body shared by handlers and middleware.
pub fn json_error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        match &self {
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request_failed");
                json_error(status, code, "an internal error occurred")
            }
            other => json_error(status, code, &other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Conflict(constraint) => ApiError::Conflict(conflict_message(&constraint)),
            StoreError::Invalid(constraint) => ApiError::BadRequest(check_message(&constraint)),
            StoreError::Timeout => ApiError::Internal(anyhow::anyhow!("query timed out")),
            StoreError::Other(e) => ApiError::Internal(e),
        }
    }
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "users_email_key" => "a user with that email already exists".into(),
        "subscriptions_email_key" => "that email is already subscribed".into(),
        "invoices_invoice_number_key" => "an invoice with that number already exists".into(),
        _ => "resource already exists".into(),
    }
}

fn check_message(constraint: &str) -> String {
    match constraint {
        "trips_seats_check" => {
            "seats must be greater than zero and available_seats between 0 and seats".into()
        }
        "trips_dates_check" => "end_date must not be before start_date".into(),
        "trips_price_check" => "price must be greater than zero".into(),
        "comments_rating_check" => "rating must be between 1 and 5".into(),
        _ => "request violates a data constraint".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn store_not_found_is_404() {
        let resp = ApiError::from(StoreError::NotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn duplicate_email_is_409() {
        let resp = ApiError::from(StoreError::Conflict("users_email_key".into())).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "a user with that email already exists");
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let err = StoreError::Other(anyhow::anyhow!("connection refused on 10.0.0.7:5432"));
        let resp = ApiError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert!(!body.to_string().contains("10.0.0.7"));
    }

    #[tokio::test]
    async fn check_violation_is_400_with_field_message() {
        let resp = ApiError::from(StoreError::Invalid("trips_seats_check".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].as_str().unwrap().contains("available_seats"));
    }

    #[test]
    fn timeout_is_a_server_error() {
        assert_eq!(
            ApiError::from(StoreError::Timeout).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
