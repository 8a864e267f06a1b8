use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::Error;

/// Failure of an HTTP request, either rejected at the boundary or by the ledger.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Ledger(#[from] Error),
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Ledger(Error::DuplicateAccountId(_)) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(Error::AccountNotFound(_)) => StatusCode::NOT_FOUND,
            // Client-caused, so not a 500
            ApiError::Ledger(Error::InsufficientBalance(_) | Error::BalanceOverflow(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Ledger(Error::NegativeBalance | Error::NegativeAmount) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Ledger(Error::DuplicateAccountId(_)) => "duplicate_account_id",
            ApiError::Ledger(Error::AccountNotFound(_)) => "account_not_found",
            ApiError::Ledger(Error::InsufficientBalance(_)) => "insufficient_balance",
            ApiError::Ledger(Error::BalanceOverflow(_)) => "balance_overflow",
            ApiError::Ledger(Error::NegativeBalance) => "negative_balance",
            ApiError::Ledger(Error::NegativeAmount) => "negative_amount",
            ApiError::Validation(_) => "validation_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        json_error(self.status(), self.code(), self.to_string())
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
