use crate::error::StoreError;
use crate::store::LinkStore;
use async_trait::async_trait;
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use std::time::Duration;

/// A stored value together with its optional expiry.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expire_at: Option<Timestamp>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expire_at
            .is_some_and(|expire_at| Timestamp::now() >= expire_at)
    }
}

/// In-memory implementation of the [`LinkStore`] trait using DashMap.
///
/// Expired entries are treated as absent and removed lazily on access,
/// mirroring a remote store's eviction from the caller's point of view.
/// Useful for unit tests and embedded callers that don't want a remote
/// store dependency.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    storage: DashMap<String, Entry>,
}

impl InMemoryLinkStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    fn expire_at(ttl: Duration) -> Result<Timestamp, StoreError> {
        let ttl = SignedDuration::try_from(ttl)
            .map_err(|e| StoreError::Operation(format!("invalid ttl: {}", e)))?;
        Ok(Timestamp::now() + ttl)
    }

    /// Matches the pattern shapes the registry emits: a literal prefix
    /// followed by a trailing `*`, or a literal key with no wildcard.
    fn matches(pattern: &str, key: &str) -> bool {
        match pattern.strip_suffix('*') {
            Some(prefix) => key.starts_with(prefix),
            None => key == pattern,
        }
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expire_at: None,
            },
        );
        Ok(())
    }

    async fn put_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let expire_at = Self::expire_at(ttl)?;
        self.storage.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expire_at: Some(expire_at),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let Some(entry) = self.storage.get(key) else {
            return Ok(None);
        };

        if entry.is_expired() {
            drop(entry);
            self.storage.remove(key);
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }

    async fn remove(&self, key: &str) -> Result<u64, StoreError> {
        // An expired entry counts as already gone, matching store eviction.
        match self.storage.remove(key) {
            Some((_, entry)) if !entry.is_expired() => Ok(1),
            _ => Ok(0),
        }
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        let mut expired = Vec::new();

        for entry in self.storage.iter() {
            if !Self::matches(pattern, entry.key()) {
                continue;
            }
            if entry.value().is_expired() {
                expired.push(entry.key().clone());
            } else {
                keys.push(entry.key().clone());
            }
        }

        for key in expired {
            self.storage.remove(&key);
        }

        Ok(keys)
    }

    async fn remove_batch(&self, keys: &[String]) -> Result<Vec<u64>, StoreError> {
        let mut outcomes = Vec::with_capacity(keys.len());
        for key in keys {
            outcomes.push(self.remove(key).await?);
        }
        Ok(outcomes)
    }
}
