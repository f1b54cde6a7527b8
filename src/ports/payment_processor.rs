//! Payment processor port for the remote "create payment" API.
//!
//! Defines the contract the checkout flow uses to hand a signed payment
//! request to the processor and get back the buyer redirect.
//!
//! # Design
//!
//! - **Signed input**: adapters send the request exactly as signed and never
//!   re-serialize its parameters
//! - **No retries**: a failed call surfaces to the buyer as a payment error

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::RemoteTxId;
use crate::domain::payment::{GatewayError, SignedPaymentRequest};

/// Port for the processor's create-payment endpoint.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create a payment for a signed request.
    ///
    /// Returns the URL to send the buyer to and the processor's transaction
    /// id. Both are guaranteed non-empty.
    async fn create_payment(
        &self,
        request: &SignedPaymentRequest,
    ) -> Result<PaymentSession, PaymentError>;
}

/// Created payment on the processor side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    /// Hosted payment page for the buyer.
    pub url: String,

    /// Processor transaction id, echoed back in callbacks.
    pub tx: RemoteTxId,
}

/// Errors from processor operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// HTTP status returned by the processor (if any).
    pub http_status: Option<u16>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            http_status: None,
        }
    }

    /// Attach the HTTP status the processor answered with.
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Connection failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Request did not finish within the configured timeout.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Timeout, message)
    }

    /// Non-success HTTP status.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::HttpStatus, message).with_http_status(status)
    }

    /// Body was not the expected JSON or lacked `url`/`tx`.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for GatewayError {
    fn from(err: PaymentError) -> Self {
        GatewayError::Upstream(err.to_string())
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Outbound timeout expired.
    Timeout,

    /// Processor answered with a non-success status.
    HttpStatus,

    /// Unusable response body.
    InvalidResponse,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::Timeout => "timeout",
            PaymentErrorCode::HttpStatus => "http_status",
            PaymentErrorCode::InvalidResponse => "invalid_response",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::ErrorCategory;

    #[test]
    fn payment_processor_is_object_safe() {
        fn _accepts_dyn(_processor: &dyn PaymentProcessor) {}
    }

    #[test]
    fn payment_error_display() {
        let err = PaymentError::invalid_response("missing tx");
        assert_eq!(err.to_string(), "invalid_response: missing tx");
    }

    #[test]
    fn http_status_is_recorded() {
        let err = PaymentError::http_status(500, "server error");
        assert_eq!(err.code, PaymentErrorCode::HttpStatus);
        assert_eq!(err.http_status, Some(500));
    }

    #[test]
    fn converts_to_upstream_gateway_error() {
        let err: GatewayError = PaymentError::timeout("after 15s").into();
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert!(err.to_string().contains("after 15s"));
    }
}
