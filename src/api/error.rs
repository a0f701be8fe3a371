//! Error-to-response mapping.
//!
//! Every failure leaves the API in the same envelope shape:
//!
//! ```json
//! {"error": {"code": "TRADE_NOT_FOUND", "message": "...", "details": {"trade_id": 7}}}
//! ```
//!
//! Internal failures are logged with their real cause and surfaced to the
//! client behind a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::domain::errors::TradeError;

#[derive(Debug)]
pub enum ApiError {
    Domain(TradeError),
    Unauthorized(&'static str),
}

impl ApiError {
    pub fn unauthorized(message: &'static str) -> Self {
        ApiError::Unauthorized(message)
    }
}

impl From<TradeError> for ApiError {
    fn from(err: TradeError) -> Self {
        ApiError::Domain(err)
    }
}

fn envelope(code: &str, message: &str, details: Option<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "details": details,
        }
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(message) => {
                warn!("Unauthorized request: {}", message);
                (
                    StatusCode::UNAUTHORIZED,
                    Json(envelope("UNAUTHORIZED", message, None)),
                )
                    .into_response()
            }
            ApiError::Domain(err) => {
                let status = match &err {
                    TradeError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    TradeError::TradeNotFound { .. } => StatusCode::NOT_FOUND,
                    TradeError::AlreadyClosed { .. } => StatusCode::BAD_REQUEST,
                    TradeError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    TradeError::UsernameTaken(_) => StatusCode::CONFLICT,
                    TradeError::Forbidden => StatusCode::FORBIDDEN,
                    TradeError::Internal(_) | TradeError::Database(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };

                let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!("Internal error: {}", err);
                    envelope(
                        err.code(),
                        "An unexpected error occurred. Please try again later.",
                        None,
                    )
                } else {
                    warn!("Request failed: {} - {}", err.code(), err);
                    envelope(err.code(), &err.to_string(), err.details())
                };

                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(TradeError, StatusCode)> = vec![
            (
                TradeError::validation("entry_price", "must be greater than 0"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                TradeError::TradeNotFound { trade_id: 1 },
                StatusCode::NOT_FOUND,
            ),
            (
                TradeError::AlreadyClosed { trade_id: 1 },
                StatusCode::BAD_REQUEST,
            ),
            (TradeError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                TradeError::UsernameTaken("alice".to_string()),
                StatusCode::CONFLICT,
            ),
            (TradeError::Forbidden, StatusCode::FORBIDDEN),
            (
                TradeError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let response =
            ApiError::from(TradeError::Internal("secret connection string".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The cause is only logged; the body carries the generic message.
    }
}
