//! CreatePaymentHandler - Command handler for the pay page.
//!
//! Builds the signed payment request for an order, sends it to the
//! processor, records the returned transaction id on the order and hands
//! back the processor URL the buyer is redirected to.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::domain::foundation::{OrderId, RemoteTxId, SessionId};
use crate::domain::order::{Order, OrderEvent};
use crate::domain::payment::{GatewayError, PaymentRequest, PaymentRequestContext};
use crate::ports::{
    EventPublisher, OrderRepository, PaymentArgsFilter, PaymentProcessor, SessionStore,
    SELECTED_GUID_KEY,
};

use super::{ensure_available, MAX_UPDATE_ATTEMPTS};

/// Command to create the remote payment for an order.
#[derive(Debug, Clone)]
pub struct CreatePaymentCommand {
    pub order_id: OrderId,
    pub session_id: SessionId,
    /// Order key from the pay-page URL; checked when present.
    pub order_key: Option<String>,
}

/// Result of creating the remote payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaymentResult {
    /// Processor page the buyer pays on.
    pub redirect_url: String,
    pub tx: RemoteTxId,
}

/// Handler for creating remote payments.
pub struct CreatePaymentHandler {
    config: Arc<GatewayConfig>,
    orders: Arc<dyn OrderRepository>,
    sessions: Arc<dyn SessionStore>,
    processor: Arc<dyn PaymentProcessor>,
    event_publisher: Arc<dyn EventPublisher>,
    filters: Vec<Arc<dyn PaymentArgsFilter>>,
}

impl CreatePaymentHandler {
    pub fn new(
        config: Arc<GatewayConfig>,
        orders: Arc<dyn OrderRepository>,
        sessions: Arc<dyn SessionStore>,
        processor: Arc<dyn PaymentProcessor>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            config,
            orders,
            sessions,
            processor,
            event_publisher,
            filters: Vec::new(),
        }
    }

    /// Register parameter filters, applied in order before signing.
    pub fn with_filters(mut self, filters: Vec<Arc<dyn PaymentArgsFilter>>) -> Self {
        self.filters = filters;
        self
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentCommand,
    ) -> Result<CreatePaymentResult, GatewayError> {
        ensure_available(&self.config)?;

        // 1. Load and check the order
        let order = self
            .orders
            .find_by_id(cmd.order_id)
            .await?
            .ok_or(GatewayError::OrderNotFound(cmd.order_id))?;

        if let Some(key) = &cmd.order_key {
            if key != &order.order_key {
                tracing::warn!(order_id = %order.id, "Pay page opened with wrong order key");
                return Err(GatewayError::OrderKeyMismatch);
            }
        }
        if !order.status.needs_payment() {
            return Err(GatewayError::OrderNotPayable(order.id));
        }

        // 2. Currency chosen at checkout
        let guid = self
            .sessions
            .get(cmd.session_id, SELECTED_GUID_KEY)
            .await?
            .filter(|g| !g.trim().is_empty())
            .ok_or(GatewayError::CurrencyNotSelected)?;
        if !self.config.is_configured_guid(&guid) {
            return Err(GatewayError::UnknownCurrency);
        }

        // 3. Build, filter and sign the request
        let urls = self.config.checkout_urls();
        let ctx = PaymentRequestContext {
            guid: &guid,
            urls: &urls,
        };
        let mut request = PaymentRequest::for_order(&order, &ctx);
        for filter in &self.filters {
            filter.filter(&order, request.params_mut());
        }
        let signed = request.sign(&self.config.ipn_secret);

        // 4. Call the processor
        let session = self
            .processor
            .create_payment(&signed)
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order.id, error = %e, "Moolah payment request failed");
                GatewayError::from(e)
            })?;

        // 5. Remember the transaction id for the callback
        self.record_remote_tx(order, &session.tx).await?;

        self.event_publisher
            .publish(OrderEvent::payment_requested(cmd.order_id, session.tx.clone()))
            .await?;

        tracing::info!(
            order_id = %cmd.order_id,
            tx = %session.tx,
            "Moolah payment created"
        );

        Ok(CreatePaymentResult {
            redirect_url: session.url,
            tx: session.tx,
        })
    }

    /// Persist `tx` on the order, re-reading it after lost update races.
    async fn record_remote_tx(&self, mut order: Order, tx: &RemoteTxId) -> Result<(), GatewayError> {
        let order_id = order.id;
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            order.attach_remote_tx(tx.clone());
            match self.orders.update(&order).await {
                Ok(_) => return Ok(()),
                Err(e) if e.is_version_conflict() && attempt < MAX_UPDATE_ATTEMPTS => {
                    tracing::debug!(order_id = %order_id, attempt, "Version conflict, reloading order");
                    order = self
                        .orders
                        .find_by_id(order_id)
                        .await?
                        .ok_or(GatewayError::OrderNotFound(order_id))?;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(GatewayError::Storage(format!(
            "Order {} kept changing while recording tx",
            order_id
        )))
    }
}
