use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::pricing::QuoteError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Quote rejected: {0}")]
    Quote(QuoteError),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Quote(QuoteError::InvalidQuantity(_) | QuoteError::TierInactive(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Quote(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Quote(QuoteError::NotPurchasable(_)) => "NOT_PURCHASABLE",
            AppError::Quote(QuoteError::InsufficientInventory { .. }) => "INSUFFICIENT_INVENTORY",
            AppError::Quote(_) => "INVALID_QUOTE",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => {
                warn!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::Quote(e) => {
                warn!(code = self.code(), error = %e, "Quote rejected");
            }
            AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Quote(QuoteError::NotPurchasable(status)) => {
                Some(json!({ "status": status.as_str() }))
            }
            AppError::Quote(QuoteError::InsufficientInventory { requested, remaining }) => {
                Some(json!({ "requested": requested, "remaining": remaining }))
            }
            _ => None,
        }
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            // Fee and commission rates come from configuration, not the buyer.
            QuoteError::Settlement(e) => AppError::InternalServerError(e.to_string()),
            other => AppError::Quote(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Only expose high-level message to the client
        let public_message = match &self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Quote(e) => e.to_string(),
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
            AppError::InternalServerError(_) => "An internal error occurred".to_string(),
        };

        error_response(code, public_message, self.details(), status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{OfferingStatus, SettlementError};

    #[test]
    fn test_quote_errors_map_to_client_statuses() {
        let sold_out: AppError = QuoteError::NotPurchasable(OfferingStatus::SoldOut).into();
        assert_eq!(sold_out.status_code(), StatusCode::CONFLICT);
        assert_eq!(sold_out.code(), "NOT_PURCHASABLE");

        let zero: AppError = QuoteError::InvalidQuantity(0).into();
        assert_eq!(zero.status_code(), StatusCode::BAD_REQUEST);

        let short: AppError = QuoteError::InsufficientInventory {
            requested: 4,
            remaining: 1,
        }
        .into();
        assert_eq!(short.code(), "INSUFFICIENT_INVENTORY");
        assert_eq!(short.details().unwrap()["remaining"], 1);
    }

    #[test]
    fn test_settlement_errors_are_internal() {
        let err: AppError = QuoteError::Settlement(SettlementError::RateTooHigh(20_000)).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_response() {
        let response = AppError::NotFound("Event not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
