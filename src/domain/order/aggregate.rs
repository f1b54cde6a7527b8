//! Order aggregate as seen by the payment gateway.
//!
//! The order belongs to the host order-management system. The gateway only
//! reads its totals, records the processor's transaction id, appends notes
//! and drives the payment-related status transitions.
//!
//! # Design Decisions
//!
//! - **Money as decimal**: totals are `rust_decimal::Decimal`, never floats
//! - **Optimistic concurrency**: `version` is bumped by the repository on
//!   every successful update and checked on write
//! - **Idempotent transitions**: completing a paid order or cancelling a
//!   cancelled one reports `false` and changes nothing
//! - **Owed events**: a transition marks its event as due; the flag is only
//!   cleared once the event was published, so a failed publish is retried by
//!   the next callback

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, OrderId, RemoteTxId, StateMachine, Timestamp, ValidationError,
};

use super::OrderStatus;

/// A note appended to an order's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNote {
    pub content: String,
    pub created_at: Timestamp,
}

/// Order aggregate.
///
/// # Invariants
///
/// - `total` is never negative
/// - `currency` is a non-empty ISO 4217 code
/// - Status transitions follow `OrderStatus` state machine rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Host system identifier.
    pub id: OrderId,

    /// Human-facing order number.
    pub number: String,

    /// Secret key the host system uses in buyer-facing URLs.
    pub order_key: String,

    /// Order total in `currency`.
    pub total: Decimal,

    /// Store currency code (e.g. "EUR").
    pub currency: String,

    /// Current status.
    pub status: OrderStatus,

    /// Processor transaction id recorded when the payment was requested.
    pub remote_tx: Option<RemoteTxId>,

    /// Order history notes, oldest first.
    pub notes: Vec<OrderNote>,

    /// Version read from the store; checked on update.
    pub version: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// When the payment-completion transition ran.
    pub paid_at: Option<Timestamp>,

    /// `PaymentCompleted` for the latest completion is not yet published.
    #[serde(default)]
    pub completion_event_due: bool,

    /// `PaymentCancelled` for the latest cancellation is not yet published.
    #[serde(default)]
    pub cancellation_event_due: bool,
}

impl Order {
    /// Create a new pending order.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a negative total or blank currency.
    pub fn new(
        id: OrderId,
        number: impl Into<String>,
        order_key: impl Into<String>,
        total: Decimal,
        currency: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let currency = currency.into();
        if currency.trim().is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if total.is_sign_negative() && !total.is_zero() {
            return Err(ValidationError::invalid_format("total", "must not be negative"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            number: number.into(),
            order_key: order_key.into(),
            total,
            currency,
            status: OrderStatus::Pending,
            remote_tx: None,
            notes: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
            paid_at: None,
            completion_event_due: false,
            cancellation_event_due: false,
        })
    }

    /// Record the processor's transaction id for later callback correlation.
    pub fn attach_remote_tx(&mut self, tx: RemoteTxId) {
        self.remote_tx = Some(tx);
        self.updated_at = Timestamp::now();
    }

    /// Append a note to the order history.
    pub fn add_note(&mut self, content: impl Into<String>) {
        let now = Timestamp::now();
        self.notes.push(OrderNote {
            content: content.into(),
            created_at: now,
        });
        self.updated_at = now;
    }

    /// Returns true once money has been received.
    pub fn is_paid(&self) -> bool {
        self.status.is_paid()
    }

    /// Run the payment-completion transition.
    ///
    /// Returns `Ok(true)` when the order moved to `Processing`, `Ok(false)`
    /// when it was already past payment.
    pub fn payment_complete(&mut self) -> Result<bool, DomainError> {
        if !self.status.needs_payment() {
            return Ok(false);
        }
        self.transition_to(OrderStatus::Processing)?;
        let now = Timestamp::now();
        self.paid_at = Some(now);
        self.updated_at = now;
        self.completion_event_due = true;
        self.cancellation_event_due = false;
        Ok(true)
    }

    /// Cancel the order with an explanatory note.
    ///
    /// Returns `Ok(false)` when the order is already cancelled.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` when the current status cannot be
    /// cancelled (completed or refunded orders).
    pub fn cancel(&mut self, note: impl Into<String>) -> Result<bool, DomainError> {
        if self.status == OrderStatus::Cancelled {
            return Ok(false);
        }
        self.transition_to(OrderStatus::Cancelled)?;
        self.add_note(note);
        self.cancellation_event_due = true;
        self.completion_event_due = false;
        Ok(true)
    }

    /// Returns true unless the state machine forbids cancelling from the
    /// current status.
    pub fn can_cancel(&self) -> bool {
        self.status == OrderStatus::Cancelled
            || self.status.can_transition_to(&OrderStatus::Cancelled)
    }

    pub fn mark_completion_published(&mut self) {
        self.completion_event_due = false;
    }

    pub fn mark_cancellation_published(&mut self) {
        self.cancellation_event_due = false;
    }

    /// Returns true if any note contains `needle`.
    pub fn has_note_containing(&self, needle: &str) -> bool {
        self.notes.iter().any(|n| n.content.contains(needle))
    }

    fn transition_to(&mut self, target: OrderStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition order {} from {} to {}",
                    self.id, self.status, target
                ),
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pending_order() -> Order {
        Order::new(OrderId::new(100), "100", "wc_order_abc", dec!(0.05), "EUR").unwrap()
    }

    #[test]
    fn new_order_starts_pending() {
        let order = pending_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.remote_tx.is_none());
        assert!(order.notes.is_empty());
        assert_eq!(order.version, 0);
    }

    #[test]
    fn new_order_rejects_negative_total() {
        let result = Order::new(OrderId::new(1), "1", "k", dec!(-1), "EUR");
        assert!(result.is_err());
    }

    #[test]
    fn new_order_rejects_blank_currency() {
        let result = Order::new(OrderId::new(1), "1", "k", dec!(1), " ");
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn payment_complete_moves_to_processing() {
        let mut order = pending_order();
        assert_eq!(order.payment_complete().unwrap(), true);
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(order.paid_at.is_some());
    }

    #[test]
    fn payment_complete_twice_is_noop() {
        let mut order = pending_order();
        order.payment_complete().unwrap();
        let paid_at = order.paid_at;

        assert_eq!(order.payment_complete().unwrap(), false);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.paid_at, paid_at);
    }

    #[test]
    fn payment_complete_recovers_cancelled_order() {
        let mut order = pending_order();
        order.cancel("timed out").unwrap();
        assert_eq!(order.payment_complete().unwrap(), true);
        assert_eq!(order.status, OrderStatus::Processing);
    }

    #[test]
    fn cancel_appends_note() {
        let mut order = pending_order();
        assert_eq!(order.cancel("Payment cancelled/timed out.").unwrap(), true);
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(order.has_note_containing("cancelled/timed out"));
    }

    #[test]
    fn cancel_twice_is_noop() {
        let mut order = pending_order();
        order.cancel("first").unwrap();
        assert_eq!(order.cancel("second").unwrap(), false);
        assert_eq!(order.notes.len(), 1);
    }

    #[test]
    fn cancel_completed_order_fails() {
        let mut order = pending_order();
        order.status = OrderStatus::Completed;
        let err = order.cancel("nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn transitions_mark_their_event_due() {
        let mut order = pending_order();
        order.payment_complete().unwrap();
        assert!(order.completion_event_due);

        order.mark_completion_published();
        assert!(!order.completion_event_due);

        order.cancel("timed out").unwrap();
        assert!(order.cancellation_event_due);
        assert!(!order.completion_event_due);
    }

    #[test]
    fn cancel_of_processing_order_is_allowed() {
        let mut order = pending_order();
        order.payment_complete().unwrap();

        assert!(order.can_cancel());
        assert_eq!(order.cancel("late cancel").unwrap(), true);
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(!order.completion_event_due);
    }

    #[test]
    fn completed_and_refunded_orders_cannot_be_cancelled() {
        let mut order = pending_order();
        for status in [OrderStatus::Completed, OrderStatus::Refunded] {
            order.status = status;
            assert!(!order.can_cancel());
        }
    }

    #[test]
    fn attach_remote_tx_records_id() {
        let mut order = pending_order();
        order.attach_remote_tx(RemoteTxId::new("tx123").unwrap());
        assert_eq!(order.remote_tx.as_ref().map(|t| t.as_str()), Some("tx123"));
    }
}
