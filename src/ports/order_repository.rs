//! Order repository port.
//!
//! The gateway never creates or deletes orders; it looks them up and writes
//! back the fields it owns (remote transaction id, status, notes).
//!
//! # Design
//!
//! - **Optimistic locking**: `update` compares the stored version with the
//!   version the caller read and bumps it on success
//! - **Remote tx index**: callbacks locate orders by processor transaction id

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId, RemoteTxId};
use crate::domain::order::Order;

/// Repository port for orders owned by the host system.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, DomainError>;

    /// Find the order carrying a processor transaction id.
    ///
    /// Returns `None` if no order has recorded this id.
    async fn find_by_remote_tx(&self, tx: &RemoteTxId) -> Result<Option<Order>, DomainError>;

    /// Persist a modified order.
    ///
    /// Returns the stored order with its new version.
    ///
    /// # Errors
    ///
    /// - `VersionConflict` if the order changed since it was read
    /// - `OrderNotFound` if the order no longer exists
    /// - `StorageError` on persistence failure
    async fn update(&self, order: &Order) -> Result<Order, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn OrderRepository) {}
    }
}
