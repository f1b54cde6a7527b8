//! In-Memory Order Repository Adapter
//!
//! Stands in for the host platform's order store. Enforces the same
//! optimistic version check a database-backed store would.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, RemoteTxId, Timestamp};
use crate::domain::order::Order;
use crate::ports::OrderRepository;

/// In-memory order storage keyed by order id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an order as the host system would have created it.
    pub async fn insert(&self, order: Order) {
        self.orders.write().await.insert(order.id, order);
    }

    /// Get the number of stored orders
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn find_by_remote_tx(&self, tx: &RemoteTxId) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .find(|o| o.remote_tx.as_ref() == Some(tx))
            .cloned())
    }

    async fn update(&self, order: &Order) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().await;
        let stored = orders.get_mut(&order.id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", order.id),
            )
        })?;

        if stored.version != order.version {
            return Err(DomainError::version_conflict(order.version, stored.version));
        }

        let mut updated = order.clone();
        updated.version = order.version + 1;
        updated.updated_at = Timestamp::now();
        *stored = updated.clone();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(id: u64) -> Order {
        Order::new(OrderId::new(id), id.to_string(), "key", dec!(10), "EUR").unwrap()
    }

    #[tokio::test]
    async fn find_by_id_returns_seeded_order() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(order(1)).await;

        let found = repo.find_by_id(OrderId::new(1)).await.unwrap();
        assert!(found.is_some());
        assert!(repo.find_by_id(OrderId::new(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_remote_tx_matches_recorded_id() {
        let repo = InMemoryOrderRepository::new();
        let mut o = order(1);
        o.attach_remote_tx(RemoteTxId::new("tx123").unwrap());
        repo.insert(o).await;
        repo.insert(order(2)).await;

        let found = repo
            .find_by_remote_tx(&RemoteTxId::new("tx123").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, OrderId::new(1));
        assert!(repo
            .find_by_remote_tx(&RemoteTxId::new("other").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(order(1)).await;

        let mut o = repo.find_by_id(OrderId::new(1)).await.unwrap().unwrap();
        o.add_note("hello");
        let saved = repo.update(&o).await.unwrap();

        assert_eq!(saved.version, 1);
        let stored = repo.find_by_id(OrderId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert!(stored.has_note_containing("hello"));
    }

    #[tokio::test]
    async fn stale_update_is_version_conflict() {
        let repo = InMemoryOrderRepository::new();
        repo.insert(order(1)).await;

        let first = repo.find_by_id(OrderId::new(1)).await.unwrap().unwrap();
        let second = first.clone();
        repo.update(&first).await.unwrap();

        let err = repo.update(&second).await.unwrap_err();
        assert!(err.is_version_conflict());
    }

    #[tokio::test]
    async fn update_of_unknown_order_fails() {
        let repo = InMemoryOrderRepository::new();
        let err = repo.update(&order(9)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(repo.order_count().await, 0);
    }
}
