//! Mock payment processor for testing.
//!
//! Supports:
//! - Pre-configured sessions
//! - Error injection
//! - Request capture

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::foundation::RemoteTxId;
use crate::domain::payment::SignedPaymentRequest;
use crate::ports::{PaymentError, PaymentProcessor, PaymentSession};

/// Mock payment processor.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProcessor::returning("https://moolah.io/pay/1", "tx123");
///
/// // Inject errors
/// mock.set_error(PaymentError::timeout("slow"));
///
/// // Inspect what was sent
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentProcessor {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Session returned by every successful call.
    session: Option<PaymentSession>,

    /// Error to return on the next call.
    next_error: Option<PaymentError>,

    /// Every request received, in order.
    requests: Vec<SignedPaymentRequest>,
}

impl MockPaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers every call with `url` and `tx`.
    pub fn returning(url: impl Into<String>, tx: &str) -> Self {
        let mock = Self::new();
        mock.set_session(url, tx);
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the session returned by `create_payment`.
    ///
    /// A blank `tx` leaves the mock unconfigured.
    pub fn set_session(&self, url: impl Into<String>, tx: &str) {
        self.state().session = RemoteTxId::new(tx).ok().map(|tx| PaymentSession {
            url: url.into(),
            tx,
        });
    }

    /// Set an error to return on the next call.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// All requests received so far.
    pub fn requests(&self) -> Vec<SignedPaymentRequest> {
        self.state().requests.clone()
    }

    /// Most recent request.
    pub fn last_request(&self) -> Option<SignedPaymentRequest> {
        self.state().requests.last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }
}

#[async_trait]
impl PaymentProcessor for MockPaymentProcessor {
    async fn create_payment(
        &self,
        request: &SignedPaymentRequest,
    ) -> Result<PaymentSession, PaymentError> {
        let mut state = self.state();
        state.requests.push(request.clone());

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        state
            .session
            .clone()
            .ok_or_else(|| PaymentError::invalid_response("mock processor has no session"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{PaymentParams, PaymentRequest};
    use crate::ports::PaymentErrorCode;
    use secrecy::SecretString;

    fn signed() -> SignedPaymentRequest {
        let mut params = PaymentParams::new();
        params.set("currency", "EUR");
        PaymentRequest::from_params(params).sign(&SecretString::new("s".to_string()))
    }

    #[tokio::test]
    async fn returns_configured_session_and_records_request() {
        let mock = MockPaymentProcessor::returning("https://moolah.io/pay/1", "tx123");

        let session = mock.create_payment(&signed()).await.unwrap();

        assert_eq!(session.url, "https://moolah.io/pay/1");
        assert_eq!(session.tx.as_str(), "tx123");
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.last_request().unwrap().params().get("currency"), Some("EUR"));
    }

    #[tokio::test]
    async fn injected_error_is_returned_once() {
        let mock = MockPaymentProcessor::returning("https://x", "tx1");
        mock.set_error(PaymentError::timeout("slow"));

        let err = mock.create_payment(&signed()).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::Timeout);
        assert!(mock.create_payment(&signed()).await.is_ok());
    }

    #[tokio::test]
    async fn unconfigured_mock_fails() {
        let mock = MockPaymentProcessor::new();
        assert!(mock.create_payment(&signed()).await.is_err());
    }
}
