//! Moolah.io payment processor adapter.
//!
//! Implements the `PaymentProcessor` port against the processor's
//! `GET /api/pay` endpoint.
//!
//! # Configuration
//!
//! ```ignore
//! let config = MoolahConfig::new().with_timeout(Duration::from_secs(15));
//! let processor = MoolahPaymentProcessor::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::RemoteTxId;
use crate::domain::payment::SignedPaymentRequest;
use crate::ports::{PaymentError, PaymentProcessor, PaymentSession};

/// Production API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://moolah.io";

/// Default outbound timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Moolah API configuration.
#[derive(Debug, Clone)]
pub struct MoolahConfig {
    /// Base URL for the API (default: https://moolah.io).
    api_base_url: String,

    /// Whole-request timeout for the create-payment call.
    timeout: Duration,
}

impl MoolahConfig {
    pub fn new() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full create-payment URL for a signed request.
    fn pay_url(&self, request: &SignedPaymentRequest) -> String {
        format!("{}/api/pay?{}", self.api_base_url, request.query_with_hash())
    }
}

impl Default for MoolahConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of a successful `/api/pay` response.
#[derive(Debug, Deserialize)]
struct PayResponse {
    url: Option<String>,
    tx: Option<serde_json::Value>,
}

impl PayResponse {
    fn into_session(self) -> Result<PaymentSession, PaymentError> {
        let url = self
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| PaymentError::invalid_response("missing url"))?;

        let tx = match self.tx {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let tx = RemoteTxId::new(tx).map_err(|_| PaymentError::invalid_response("missing tx"))?;

        Ok(PaymentSession { url, tx })
    }
}

/// Moolah payment processor adapter.
pub struct MoolahPaymentProcessor {
    config: MoolahConfig,
    http_client: reqwest::Client,
}

impl MoolahPaymentProcessor {
    /// Create an adapter with an HTTP client bound to the configured timeout.
    pub fn new(config: MoolahConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl PaymentProcessor for MoolahPaymentProcessor {
    async fn create_payment(
        &self,
        request: &SignedPaymentRequest,
    ) -> Result<PaymentSession, PaymentError> {
        let url = self.config.pay_url(request);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(error = %e, "Moolah create_payment timed out");
                PaymentError::timeout(e.to_string())
            } else {
                tracing::warn!(error = %e, "Moolah create_payment request failed");
                PaymentError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                error = %error_text,
                "Moolah create_payment failed"
            );
            return Err(PaymentError::http_status(
                status.as_u16(),
                format!("Moolah API error: HTTP {}", status.as_u16()),
            ));
        }

        let body: PayResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Moolah response");
            if e.is_timeout() {
                PaymentError::timeout(e.to_string())
            } else {
                PaymentError::invalid_response(format!("Failed to parse Moolah response: {}", e))
            }
        })?;

        let session = body.into_session()?;
        tracing::info!(tx = %session.tx, "Moolah payment created");
        Ok(session)
    }
}
