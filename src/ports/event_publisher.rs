//! EventPublisher port - Interface for publishing order events.
//!
//! Fulfillment listens for `PaymentCompleted`; the gateway does not know
//! about the transport (in-memory, queue, webhook fan-out).

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::order::OrderEvent;

/// Port for publishing order events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (handlers may receive duplicates)
/// - Errors are propagated to the caller
///
/// Publishing happens after the order update has been persisted.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: OrderEvent) -> Result<(), DomainError>;

    /// Publish events in order.
    async fn publish_all(&self, events: Vec<OrderEvent>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
