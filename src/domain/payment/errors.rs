//! Gateway error types.
//!
//! Every failure of the checkout and callback flows ends up as a
//! `GatewayError`, grouped into categories that decide the HTTP response.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId};

/// Coarse grouping of gateway failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or invalid merchant configuration.
    Configuration,
    /// Bad, unauthenticated or out-of-sequence input.
    Validation,
    /// The payment processor could not be used.
    Upstream,
    /// A referenced order does not exist.
    NotFound,
    /// Storage or concurrency failure.
    Infrastructure,
}

/// Errors raised while requesting payments or handling callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Gateway configuration is incomplete or invalid.
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),

    /// Gateway is switched off by the merchant.
    #[error("Gateway disabled")]
    Disabled,

    /// Callback arrived without any parameters.
    #[error("Empty callback")]
    EmptyCallback,

    /// Callback lacks a required parameter.
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// Callback secret differs from the configured one.
    #[error("IPN secret mismatch")]
    SecretMismatch,

    /// Buyer did not pick a currency.
    #[error("Please select a currency.")]
    CurrencyNotSelected,

    /// Submitted GUID is not one of the configured ones.
    #[error("Unknown currency")]
    UnknownCurrency,

    /// Pay page was opened with a key that does not belong to the order.
    #[error("Order key mismatch")]
    OrderKeyMismatch,

    /// No order carries the callback's transaction id.
    #[error("No order for transaction {0}")]
    OrderNotFoundForTx(String),

    /// No order with this id.
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    /// Order is already paid or otherwise past payment.
    #[error("Order {0} does not need payment")]
    OrderNotPayable(OrderId),

    /// Requested status change is not allowed from the current status.
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    /// Payment processor failed or returned an unusable response.
    #[error("Payment processor error: {0}")]
    Upstream(String),

    /// Order storage failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GatewayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GatewayError::NotConfigured(_) | GatewayError::Disabled => {
                ErrorCategory::Configuration
            }
            GatewayError::EmptyCallback
            | GatewayError::MissingParameter(_)
            | GatewayError::SecretMismatch
            | GatewayError::CurrencyNotSelected
            | GatewayError::UnknownCurrency
            | GatewayError::OrderKeyMismatch
            | GatewayError::OrderNotPayable(_)
            | GatewayError::InvalidTransition(_) => ErrorCategory::Validation,
            GatewayError::Upstream(_) => ErrorCategory::Upstream,
            GatewayError::OrderNotFoundForTx(_) | GatewayError::OrderNotFound(_) => {
                ErrorCategory::NotFound
            }
            GatewayError::Storage(_) => ErrorCategory::Infrastructure,
        }
    }

    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::SecretMismatch => StatusCode::UNAUTHORIZED,
            GatewayError::OrderKeyMismatch => StatusCode::FORBIDDEN,
            GatewayError::InvalidTransition(_) | GatewayError::OrderNotPayable(_) => {
                StatusCode::CONFLICT
            }
            _ => match self.category() {
                ErrorCategory::Configuration => StatusCode::SERVICE_UNAVAILABLE,
                ErrorCategory::Validation => StatusCode::BAD_REQUEST,
                ErrorCategory::Upstream => StatusCode::BAD_GATEWAY,
                ErrorCategory::NotFound => StatusCode::NOT_FOUND,
                ErrorCategory::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Only infrastructure failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Infrastructure
    }

    /// Message safe to show a buyer.
    pub fn public_message(&self) -> String {
        match self.category() {
            ErrorCategory::Upstream => "Payment error: could not reach the payment processor".to_string(),
            ErrorCategory::Infrastructure => "Internal error".to_string(),
            ErrorCategory::Configuration => "Payment method unavailable".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition | ErrorCode::ValidationFailed => {
                GatewayError::InvalidTransition(err.message)
            }
            ErrorCode::ExternalServiceError => GatewayError::Upstream(err.message),
            ErrorCode::OrderNotFound
            | ErrorCode::SessionNotFound
            | ErrorCode::VersionConflict
            | ErrorCode::StorageError
            | ErrorCode::InternalError => GatewayError::Storage(err.to_string()),
        }
    }
}
