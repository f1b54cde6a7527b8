//! Checkout session store port.
//!
//! Per-buyer scratch space that survives the checkout to pay-page redirect.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};

/// Session key holding the currency GUID picked at checkout.
pub const SELECTED_GUID_KEY: &str = "selected_guid";

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value. Returns `None` for unknown sessions or keys.
    async fn get(&self, session: SessionId, key: &str) -> Result<Option<String>, DomainError>;

    /// Write a value, creating the session on first use.
    async fn set(&self, session: SessionId, key: &str, value: String) -> Result<(), DomainError>;
}
