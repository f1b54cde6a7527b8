//! GetPaymentOptionsHandler - Query handler for the checkout payment fields.

use std::sync::Arc;

use serde::Serialize;

use crate::config::GatewayConfig;
use crate::domain::payment::CurrencyOption;

/// Query for the checkout payment options.
#[derive(Debug, Clone, Default)]
pub struct GetPaymentOptionsQuery;

/// Payment method as presented at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetPaymentOptionsResult {
    /// Whether the method may be offered at all.
    pub available: bool,
    pub title: String,
    pub description: String,
    /// Selectable currencies; empty when unavailable.
    pub currencies: Vec<CurrencyOption>,
}

/// Handler for building the checkout payment fields.
pub struct GetPaymentOptionsHandler {
    config: Arc<GatewayConfig>,
}

impl GetPaymentOptionsHandler {
    pub fn new(config: Arc<GatewayConfig>) -> Self {
        Self { config }
    }

    pub fn handle(&self, _query: GetPaymentOptionsQuery) -> GetPaymentOptionsResult {
        let available = self.config.is_available();
        let currencies = if available {
            self.config.currency_options()
        } else {
            Vec::new()
        };

        GetPaymentOptionsResult {
            available,
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            currencies,
        }
    }
}
