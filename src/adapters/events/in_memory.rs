//! In-memory event bus.
//!
//! Records every published order event and logs it. Used by the standalone
//! server (where nothing downstream consumes events) and for test
//! assertions.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::order::OrderEvent;
use crate::ports::EventPublisher;

/// In-memory event bus.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
///
/// bus.publish(OrderEvent::payment_completed(order_id, tx)).await?;
///
/// assert_eq!(bus.event_count().await, 1);
/// assert!(bus.has_event("order.payment_completed").await);
/// ```
pub struct InMemoryEventBus {
    published: RwLock<Vec<OrderEvent>>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            published: RwLock::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Returns all published events.
    pub async fn published_events(&self) -> Vec<OrderEvent> {
        self.published.read().await.clone()
    }

    /// Returns events of a specific type.
    pub async fn events_of_type(&self, event_type: &str) -> Vec<OrderEvent> {
        self.published_events()
            .await
            .into_iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Returns events for a specific order.
    pub async fn events_for_order(&self, order_id: OrderId) -> Vec<OrderEvent> {
        self.published_events()
            .await
            .into_iter()
            .filter(|e| e.order_id() == order_id)
            .collect()
    }

    /// Clears all published events.
    pub async fn clear(&self) {
        self.published.write().await.clear();
    }

    /// Returns count of published events.
    pub async fn event_count(&self) -> usize {
        self.published.read().await.len()
    }

    /// Checks if a specific event type was published.
    pub async fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .await
            .iter()
            .any(|e| e.event_type() == event_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: OrderEvent) -> Result<(), DomainError> {
        tracing::info!(
            event_type = event.event_type(),
            order_id = %event.order_id(),
            "Order event published"
        );
        self.published.write().await.push(event);
        Ok(())
    }
}
