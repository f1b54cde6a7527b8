//! HTTP DTOs (Data Transfer Objects) for checkout endpoints.
//!
//! These types define the JSON request/response structure of the checkout
//! API. They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::GetPaymentOptionsResult;
use crate::domain::payment::{Cryptocurrency, CurrencyOption};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Checkout form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessPaymentRequest {
    /// GUID of the selected currency.
    #[serde(default)]
    pub guid: Option<String>,
}

/// Query string of the pay page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayPageQuery {
    /// Order key; checked against the order when present.
    #[serde(default)]
    pub key: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A selectable currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyOptionResponse {
    pub currency: Cryptocurrency,
    pub name: String,
    pub guid: String,
}

impl From<CurrencyOption> for CurrencyOptionResponse {
    fn from(option: CurrencyOption) -> Self {
        Self {
            currency: option.currency,
            name: option.name().to_string(),
            guid: option.guid,
        }
    }
}

/// Payment method shown at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOptionsResponse {
    pub available: bool,
    pub title: String,
    pub description: String,
    pub currencies: Vec<CurrencyOptionResponse>,
}

impl From<GetPaymentOptionsResult> for PaymentOptionsResponse {
    fn from(result: GetPaymentOptionsResult) -> Self {
        Self {
            available: result.available,
            title: result.title,
            description: result.description,
            currencies: result.currencies.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of the checkout form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessPaymentResponse {
    /// Always `"success"`; failures use `ErrorResponse`.
    pub result: String,
    pub redirect: String,
}

impl ProcessPaymentResponse {
    pub fn success(redirect: impl Into<String>) -> Self {
        Self {
            result: "success".to_string(),
            redirect: redirect.into(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
