//! Order status state machine.
//!
//! Mirrors the lifecycle the host order-management system enforces. Only the
//! payment-relevant edges are exercised by the gateway.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status in the host e-commerce system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Created at checkout, awaiting payment.
    Pending,

    /// Awaiting manual confirmation.
    OnHold,

    /// Payment attempt failed.
    Failed,

    /// Paid; fulfillment in progress.
    Processing,

    /// Fulfilled.
    Completed,

    /// Cancelled by the buyer, the merchant or the processor (timeout).
    Cancelled,

    /// Paid and refunded.
    Refunded,
}

impl OrderStatus {
    /// Statuses from which the payment-completion transition may run.
    pub fn needs_payment(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::OnHold | OrderStatus::Failed | OrderStatus::Cancelled
        )
    }

    /// Returns true once money has been received for the order.
    pub fn is_paid(&self) -> bool {
        matches!(
            self,
            OrderStatus::Processing | OrderStatus::Completed | OrderStatus::Refunded
        )
    }

    /// Wire/display name used by the host system.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Failed => "failed",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, OnHold)
                | (Pending, Failed)
                | (Pending, Processing)
                | (Pending, Cancelled)
            // From ON_HOLD
                | (OnHold, Processing)
                | (OnHold, Failed)
                | (OnHold, Cancelled)
            // From FAILED
                | (Failed, Pending)
                | (Failed, Processing)
                | (Failed, Cancelled)
            // From PROCESSING
                | (Processing, Completed)
                | (Processing, OnHold)
                | (Processing, Refunded)
                | (Processing, Cancelled)
            // From COMPLETED
                | (Completed, Refunded)
            // From CANCELLED
                | (Cancelled, Processing) // Late payment
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![OnHold, Failed, Processing, Cancelled],
            OnHold => vec![Processing, Failed, Cancelled],
            Failed => vec![Pending, Processing, Cancelled],
            Processing => vec![Completed, OnHold, Refunded, Cancelled],
            Completed => vec![Refunded],
            Cancelled => vec![Processing],
            Refunded => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::OnHold,
        OrderStatus::Failed,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    #[test]
    fn pending_can_be_paid() {
        let result = OrderStatus::Pending.transition_to(OrderStatus::Processing);
        assert_eq!(result, Ok(OrderStatus::Processing));
    }

    #[test]
    fn pending_can_be_cancelled() {
        let result = OrderStatus::Pending.transition_to(OrderStatus::Cancelled);
        assert_eq!(result, Ok(OrderStatus::Cancelled));
    }

    #[test]
    fn cancelled_order_accepts_late_payment() {
        assert!(OrderStatus::Cancelled.can_transition_to(&OrderStatus::Processing));
    }

    #[test]
    fn completed_cannot_go_back_to_processing() {
        assert!(OrderStatus::Completed
            .transition_to(OrderStatus::Processing)
            .is_err());
    }

    #[test]
    fn refunded_is_terminal() {
        assert!(OrderStatus::Refunded.is_terminal());
    }

    #[test]
    fn needs_payment_and_is_paid_are_disjoint() {
        for status in ALL {
            assert!(!(status.needs_payment() && status.is_paid()), "{:?}", status);
        }
    }

    #[test]
    fn every_status_needing_payment_can_reach_processing() {
        for status in ALL.into_iter().filter(OrderStatus::needs_payment) {
            assert!(status.can_transition_to(&OrderStatus::Processing), "{:?}", status);
        }
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for status in ALL {
            for target in status.valid_transitions() {
                assert!(
                    status.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    status,
                    target
                );
            }
        }
    }

    #[test]
    fn serializes_with_host_names() {
        assert_eq!(serde_json::to_string(&OrderStatus::OnHold).unwrap(), "\"on-hold\"");
        assert_eq!(OrderStatus::Processing.to_string(), "processing");
    }
}
