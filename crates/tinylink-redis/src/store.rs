use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::Duration;
use tinylink_core::{LinkStore, StoreError};
use tracing::{trace, warn};

/// A Redis-backed implementation of [`LinkStore`].
///
/// Values are stored verbatim as strings; relative expiry maps onto
/// `SETEX`. The multiplexed connection is cloned per operation, so the
/// store itself is cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct RedisLinkStore {
    conn: redis::aio::MultiplexedConnection,
}

impl RedisLinkStore {
    /// Creates a store over an existing multiplexed connection.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Connects to the Redis instance at `url` and returns a store over a
    /// fresh multiplexed connection.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(store_error)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(store_error)?;
        Ok(Self::new(conn))
    }
}

fn store_error(e: redis::RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() {
        StoreError::Unavailable(e.to_string())
    } else {
        StoreError::Operation(e.to_string())
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        trace!(key = %key, "SET");

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(|e| {
            warn!(key = %key, error = %e, "redis SET failed");
            store_error(e)
        })
    }

    async fn put_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        // SETEX takes whole seconds; round a sub-second TTL up to one
        // second so the entry still expires.
        let seconds = ttl.as_secs().max(1);
        trace!(key = %key, seconds, "SETEX");

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(|e| {
                warn!(key = %key, error = %e, "redis SETEX failed");
                store_error(e)
            })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        trace!(key = %key, "GET");

        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key).await.map_err(|e| {
            warn!(key = %key, error = %e, "redis GET failed");
            store_error(e)
        })
    }

    async fn remove(&self, key: &str) -> Result<u64, StoreError> {
        trace!(key = %key, "DEL");

        let mut conn = self.conn.clone();
        conn.del::<_, u64>(key).await.map_err(|e| {
            warn!(key = %key, error = %e, "redis DEL failed");
            store_error(e)
        })
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        trace!(pattern = %pattern, "KEYS");

        let mut conn = self.conn.clone();
        conn.keys::<_, Vec<String>>(pattern).await.map_err(|e| {
            warn!(pattern = %pattern, error = %e, "redis KEYS failed");
            store_error(e)
        })
    }

    async fn remove_batch(&self, keys: &[String]) -> Result<Vec<u64>, StoreError> {
        trace!(count = keys.len(), "pipelined DEL");

        let mut pipe = redis::pipe();
        for key in keys {
            pipe.del(key);
        }

        let mut conn = self.conn.clone();
        let outcomes: Vec<u64> = pipe.query_async(&mut conn).await.map_err(|e| {
            warn!(count = keys.len(), error = %e, "redis pipelined DEL failed");
            store_error(e)
        })?;
        Ok(outcomes)
    }
}
