//! Merchant settings store port.
//!
//! Flat key-value option storage as kept by the host platform (for example
//! `enabled = "yes"`, `bitcoin_guid = "..."`).

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a raw option value. Returns `None` when unset.
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write an option value.
    async fn set(&self, key: &str, value: String) -> Result<(), DomainError>;

    /// Read an option, falling back to `default` when unset.
    async fn get_or(&self, key: &str, default: &str) -> Result<String, DomainError> {
        Ok(self.get(key).await?.unwrap_or_else(|| default.to_string()))
    }
}
