//! In-memory checkout session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::SessionStore;

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, HashMap<String, String>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session: SessionId, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(&session)
            .and_then(|values| values.get(key).cloned()))
    }

    async fn set(&self, session: SessionId, key: &str, value: String) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .entry(session)
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn values_are_scoped_per_session() {
        let store = InMemorySessionStore::new();
        let a = SessionId::new();
        let b = SessionId::new();

        store.set(a, "selected_guid", "g-1".into()).await.unwrap();

        assert_eq!(store.get(a, "selected_guid").await.unwrap(), Some("g-1".into()));
        assert_eq!(store.get(b, "selected_guid").await.unwrap(), None);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = InMemorySessionStore::new();
        let s = SessionId::new();
        store.set(s, "k", "1".into()).await.unwrap();
        store.set(s, "k", "2".into()).await.unwrap();
        assert_eq!(store.get(s, "k").await.unwrap(), Some("2".into()));
    }
}
