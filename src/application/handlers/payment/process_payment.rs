//! ProcessPaymentHandler - Command handler for the checkout form submission.
//!
//! Records the buyer's currency choice in the session and points the buyer
//! at the pay page, where the remote payment is created.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::domain::foundation::{OrderId, SessionId};
use crate::domain::payment::GatewayError;
use crate::ports::{OrderRepository, SessionStore, SELECTED_GUID_KEY};

use super::ensure_available;

/// Command to process the checkout submission for an order.
#[derive(Debug, Clone)]
pub struct ProcessPaymentCommand {
    pub order_id: OrderId,
    pub session_id: SessionId,
    /// GUID of the selected currency, as submitted.
    pub guid: Option<String>,
}

/// Result of processing the checkout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessPaymentResult {
    /// Pay page for the order.
    pub redirect: String,
}

/// Handler for the checkout submission.
pub struct ProcessPaymentHandler {
    config: Arc<GatewayConfig>,
    orders: Arc<dyn OrderRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl ProcessPaymentHandler {
    pub fn new(
        config: Arc<GatewayConfig>,
        orders: Arc<dyn OrderRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            orders,
            sessions,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessPaymentCommand,
    ) -> Result<ProcessPaymentResult, GatewayError> {
        ensure_available(&self.config)?;

        // 1. Validate the currency field
        let guid = cmd
            .guid
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .ok_or(GatewayError::CurrencyNotSelected)?;
        if !self.config.is_configured_guid(guid) {
            tracing::warn!(order_id = %cmd.order_id, "Unknown currency GUID submitted");
            return Err(GatewayError::UnknownCurrency);
        }

        // 2. The order must exist and still need payment
        let order = self
            .orders
            .find_by_id(cmd.order_id)
            .await?
            .ok_or(GatewayError::OrderNotFound(cmd.order_id))?;
        if !order.status.needs_payment() {
            return Err(GatewayError::OrderNotPayable(order.id));
        }

        // 3. Remember the choice for the pay page
        self.sessions
            .set(cmd.session_id, SELECTED_GUID_KEY, guid.to_string())
            .await?;

        tracing::debug!(order_id = %order.id, session_id = %cmd.session_id, "Currency selected");

        Ok(ProcessPaymentResult {
            redirect: self
                .config
                .checkout_urls()
                .pay_url(order.id, &order.order_key),
        })
    }
}
