pub mod memory;

use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

type Result<T> = std::result::Result<T, StoreError>;

/// Key-value capabilities the registry requires from a store backend.
///
/// The registry binds to this trait rather than a concrete client type, so
/// the "is this a usable store" check happens at compile time instead of at
/// construction. Implementations can be backed by Redis, an in-process map,
/// or any store that supports relative expiry and pattern scans.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Stores `value` under `key` with no expiry, overwriting any prior value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Stores `value` under `key`; the store evicts the entry once `ttl` elapses.
    async fn put_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Reads the value under `key`. Returns `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`, returning the number of keys removed (0 or 1).
    ///
    /// It is not an error if the key does not exist.
    async fn remove(&self, key: &str) -> Result<u64>;

    /// Returns every key matching a glob-style `pattern`.
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// Removes all `keys` in a single batched round trip.
    ///
    /// Returns one removed-count per attempted key, in input order. A key
    /// that vanished since it was scanned reports 0.
    async fn remove_batch(&self, keys: &[String]) -> Result<Vec<u64>>;
}

#[async_trait]
impl<S: LinkStore> LinkStore for Arc<S> {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value).await
    }

    async fn put_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        (**self).put_with_expiry(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn remove(&self, key: &str) -> Result<u64> {
        (**self).remove(key).await
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>> {
        (**self).scan_keys(pattern).await
    }

    async fn remove_batch(&self, keys: &[String]) -> Result<Vec<u64>> {
        (**self).remove_batch(keys).await
    }
}
