//! Order domain events.
//!
//! Emitted by the gateway after a payment-driven status change has been
//! persisted. Downstream fulfillment (stock, emails, shipping) subscribes to
//! these through the `EventPublisher` port.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{OrderId, RemoteTxId, Timestamp};

/// Events that occur during the payment lifecycle of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    /// The processor accepted a payment request for the order.
    PaymentRequested {
        event_id: Uuid,
        order_id: OrderId,
        remote_tx: RemoteTxId,
        occurred_at: Timestamp,
    },

    /// The order was paid.
    ///
    /// State transition: Pending/OnHold/Failed/Cancelled -> Processing
    ///
    /// Trigger: IPN with `status=complete`. Emitted at most once per order.
    PaymentCompleted {
        event_id: Uuid,
        order_id: OrderId,
        remote_tx: RemoteTxId,
        occurred_at: Timestamp,
    },

    /// The payment was cancelled or timed out at the processor.
    ///
    /// Trigger: IPN with `status=cancelled`.
    PaymentCancelled {
        event_id: Uuid,
        order_id: OrderId,
        remote_tx: RemoteTxId,
        occurred_at: Timestamp,
    },
}

impl OrderEvent {
    pub fn payment_requested(order_id: OrderId, remote_tx: RemoteTxId) -> Self {
        OrderEvent::PaymentRequested {
            event_id: Uuid::new_v4(),
            order_id,
            remote_tx,
            occurred_at: Timestamp::now(),
        }
    }

    pub fn payment_completed(order_id: OrderId, remote_tx: RemoteTxId) -> Self {
        OrderEvent::PaymentCompleted {
            event_id: Uuid::new_v4(),
            order_id,
            remote_tx,
            occurred_at: Timestamp::now(),
        }
    }

    pub fn payment_cancelled(order_id: OrderId, remote_tx: RemoteTxId) -> Self {
        OrderEvent::PaymentCancelled {
            event_id: Uuid::new_v4(),
            order_id,
            remote_tx,
            occurred_at: Timestamp::now(),
        }
    }

    /// Dotted event type name used for routing and logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::PaymentRequested { .. } => "order.payment_requested",
            OrderEvent::PaymentCompleted { .. } => "order.payment_completed",
            OrderEvent::PaymentCancelled { .. } => "order.payment_cancelled",
        }
    }

    /// The order the event concerns.
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderEvent::PaymentRequested { order_id, .. }
            | OrderEvent::PaymentCompleted { order_id, .. }
            | OrderEvent::PaymentCancelled { order_id, .. } => *order_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx() -> RemoteTxId {
        RemoteTxId::new("tx123").unwrap()
    }

    #[test]
    fn event_types_are_dotted_names() {
        let id = OrderId::new(7);
        assert_eq!(
            OrderEvent::payment_requested(id, tx()).event_type(),
            "order.payment_requested"
        );
        assert_eq!(
            OrderEvent::payment_completed(id, tx()).event_type(),
            "order.payment_completed"
        );
        assert_eq!(
            OrderEvent::payment_cancelled(id, tx()).event_type(),
            "order.payment_cancelled"
        );
    }

    #[test]
    fn order_id_is_exposed_for_every_variant() {
        let id = OrderId::new(42);
        assert_eq!(OrderEvent::payment_completed(id, tx()).order_id(), id);
        assert_eq!(OrderEvent::payment_cancelled(id, tx()).order_id(), id);
    }

    #[test]
    fn serializes_with_type_tag() {
        let event = OrderEvent::payment_completed(OrderId::new(1), tx());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "payment_completed");
        assert_eq!(json["remote_tx"], "tx123");
    }
}
