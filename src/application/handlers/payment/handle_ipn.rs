//! HandleIpnHandler - Command handler for processor payment notifications.
//!
//! The callback is unauthenticated apart from the shared secret it carries,
//! so nothing touches an order until the parameters are present and the
//! secret matches.

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::config::GatewayConfig;
use crate::domain::foundation::{OrderId, RemoteTxId};
use crate::domain::order::{Order, OrderEvent};
use crate::domain::payment::{
    fingerprint, secrets_match, GatewayError, IpnNotification, IpnRequest, IpnStatus,
};
use crate::ports::{EventPublisher, OrderRepository};

use super::{NOTE_PAYMENT_CANCELLED, NOTE_PAYMENT_COMPLETE};

/// Attempts at writing an order before giving up on version conflicts.
pub const MAX_UPDATE_ATTEMPTS: u32 = 3;

/// Command to handle one IPN callback.
#[derive(Debug, Clone)]
pub struct HandleIpnCommand {
    pub request: IpnRequest,
}

/// Result of IPN processing. Every variant is acknowledged with 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleIpnResult {
    /// Order moved to processing.
    PaymentCompleted { order_id: OrderId },
    /// Order was already paid; nothing changed.
    AlreadyPaid { order_id: OrderId },
    /// Order cancelled.
    PaymentCancelled { order_id: OrderId },
    /// Order was already cancelled; nothing changed.
    AlreadyCancelled { order_id: OrderId },
    /// Cancel arrived for a completed or refunded order and was ignored.
    CancelIgnored { order_id: OrderId },
    /// Status with no associated action.
    Ignored { status: String },
}

/// Handler for IPN callbacks.
pub struct HandleIpnHandler {
    config: Arc<GatewayConfig>,
    orders: Arc<dyn OrderRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl HandleIpnHandler {
    pub fn new(
        config: Arc<GatewayConfig>,
        orders: Arc<dyn OrderRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            config,
            orders,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: HandleIpnCommand) -> Result<HandleIpnResult, GatewayError> {
        // 1-2. Parameters present
        let notification = IpnNotification::parse(&cmd.request).map_err(|e| {
            tracing::warn!(error = %e, "Moolah IPN rejected");
            e
        })?;

        // 3. Shared secret
        let expected = self.config.ipn_secret.expose_secret();
        if expected.is_empty() {
            tracing::error!("Moolah IPN received but no IPN secret is configured");
            return Err(GatewayError::NotConfigured("gateway.ipn_secret".to_string()));
        }
        if !secrets_match(&notification.offered_secret, expected) {
            tracing::warn!(
                tx = %notification.tx,
                secret_fingerprint = %fingerprint(&notification.offered_secret),
                "Moolah IPN secret mismatch"
            );
            return Err(GatewayError::SecretMismatch);
        }

        // 4. Order lookup
        let order = self.find_order(&notification.tx).await?;

        tracing::debug!(
            order_id = %order.id,
            tx = %notification.tx,
            status = notification.status.as_str(),
            "Moolah IPN accepted"
        );

        // 5. Status application
        match &notification.status {
            IpnStatus::Complete => self.complete(order, &notification.tx).await,
            IpnStatus::Cancelled => self.cancel(order, &notification.tx).await,
            IpnStatus::Other(status) => {
                tracing::info!(order_id = %order.id, status = %status, "Moolah IPN status ignored");
                Ok(HandleIpnResult::Ignored {
                    status: status.clone(),
                })
            }
        }
    }

    async fn find_order(&self, tx: &RemoteTxId) -> Result<Order, GatewayError> {
        self.orders.find_by_remote_tx(tx).await?.ok_or_else(|| {
            tracing::warn!(tx = %tx, "Moolah IPN for unknown transaction");
            GatewayError::OrderNotFoundForTx(tx.to_string())
        })
    }

    async fn complete(
        &self,
        mut order: Order,
        tx: &RemoteTxId,
    ) -> Result<HandleIpnResult, GatewayError> {
        let order_id = order.id;
        let mut completed_now = false;
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            if order.is_paid() {
                break;
            }

            order.add_note(NOTE_PAYMENT_COMPLETE);
            order.payment_complete()?;

            match self.orders.update(&order).await {
                Ok(stored) => {
                    order = stored;
                    completed_now = true;
                    break;
                }
                Err(e) if e.is_version_conflict() && attempt < MAX_UPDATE_ATTEMPTS => {
                    tracing::debug!(order_id = %order_id, attempt, "Version conflict, reloading order");
                    order = self.find_order(tx).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
        if !order.is_paid() {
            return Err(conflict_exhausted(order_id));
        }

        if order.completion_event_due {
            let event = OrderEvent::payment_completed(order_id, tx.clone());
            self.publish_due(order, tx, event, Order::mark_completion_published)
                .await?;
        }

        if completed_now {
            tracing::info!(order_id = %order_id, tx = %tx, "Moolah payment complete");
            Ok(HandleIpnResult::PaymentCompleted { order_id })
        } else {
            tracing::info!(order_id = %order_id, "Duplicate Moolah completion ignored");
            Ok(HandleIpnResult::AlreadyPaid { order_id })
        }
    }

    async fn cancel(
        &self,
        mut order: Order,
        tx: &RemoteTxId,
    ) -> Result<HandleIpnResult, GatewayError> {
        let order_id = order.id;
        let mut cancelled_now = false;
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            if !order.can_cancel() {
                tracing::warn!(
                    order_id = %order_id,
                    status = %order.status,
                    "Moolah cancellation ignored for order past processing"
                );
                return Ok(HandleIpnResult::CancelIgnored { order_id });
            }

            if !order.cancel(NOTE_PAYMENT_CANCELLED)? {
                break;
            }

            match self.orders.update(&order).await {
                Ok(stored) => {
                    order = stored;
                    cancelled_now = true;
                    break;
                }
                Err(e) if e.is_version_conflict() && attempt < MAX_UPDATE_ATTEMPTS => {
                    tracing::debug!(order_id = %order_id, attempt, "Version conflict, reloading order");
                    order = self.find_order(tx).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        if order.cancellation_event_due {
            let event = OrderEvent::payment_cancelled(order_id, tx.clone());
            self.publish_due(order, tx, event, Order::mark_cancellation_published)
                .await?;
        }

        if cancelled_now {
            tracing::info!(order_id = %order_id, tx = %tx, "Moolah payment cancelled");
            Ok(HandleIpnResult::PaymentCancelled { order_id })
        } else {
            Ok(HandleIpnResult::AlreadyCancelled { order_id })
        }
    }

    /// Publishes an owed event, then clears its flag on the order.
    ///
    /// A failed publish leaves the flag set, so the processor's retry of the
    /// same callback publishes again.
    async fn publish_due(
        &self,
        mut order: Order,
        tx: &RemoteTxId,
        event: OrderEvent,
        mark_published: fn(&mut Order),
    ) -> Result<(), GatewayError> {
        self.event_publisher.publish(event).await?;

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            mark_published(&mut order);
            match self.orders.update(&order).await {
                Ok(_) => return Ok(()),
                Err(e) if e.is_version_conflict() && attempt < MAX_UPDATE_ATTEMPTS => {
                    order = self.find_order(tx).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(conflict_exhausted(order.id))
    }
}

fn conflict_exhausted(order_id: OrderId) -> GatewayError {
    GatewayError::Storage(format!(
        "Order {} kept changing after {} attempts",
        order_id, MAX_UPDATE_ATTEMPTS
    ))
}
