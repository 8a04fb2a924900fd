use crate::error::RegistryError;
use crate::generator::IdGenerator;
use crate::store::LinkStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

type Result<T> = std::result::Result<T, RegistryError>;

/// Key prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "tiny-link:";

/// Construction-time options for a [`LinkRegistry`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RegistryConfig {
    /// Namespace prepended to every identifier to form the store key.
    /// Applies uniformly to all operations, including the flush scan.
    #[builder(default = DEFAULT_PREFIX.to_string(), setter(into))]
    pub prefix: String,

    /// Expiry applied when [`LinkRegistry::create`] is called without an
    /// explicit TTL. `None` means entries never expire.
    #[builder(default, setter(strip_option))]
    pub default_ttl: Option<Duration>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A URL-shortening facade over a key-value store.
///
/// Each operation is a single store round trip (flush: a scan followed by
/// one batched round trip) with no intermediate state. The registry holds
/// no mutable state of its own and is cheap to clone; concurrent calls
/// coordinate only through the store itself. Store failures propagate
/// immediately, wrapped once per operation, with no retries.
#[derive(Debug, Clone)]
pub struct LinkRegistry<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    config: RegistryConfig,
}

impl<S: LinkStore, G: IdGenerator> LinkRegistry<S, G> {
    /// Creates a registry with the default prefix and no default TTL.
    pub fn new(store: S, generator: G) -> Self {
        Self::with_config(store, generator, RegistryConfig::default())
    }

    /// Creates a registry with explicit configuration.
    pub fn with_config(store: S, generator: G, config: RegistryConfig) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            config,
        }
    }

    /// Computes the full store key for an identifier.
    fn key_for(&self, identifier: &str) -> String {
        format!("{}{}", self.config.prefix, identifier)
    }

    /// Shortens `url`, returning the generated identifier.
    ///
    /// The URL is stored verbatim, with no validation or normalization.
    /// The effective TTL is `ttl` if given, otherwise the configured
    /// default; a zero TTL stores the entry without expiry. The identifier
    /// comes straight from the generator with no existence check, so a
    /// colliding identifier overwrites the prior entry.
    pub async fn create(&self, url: &str, ttl: Option<Duration>) -> Result<String> {
        let identifier = self.generator.generate();
        let key = self.key_for(&identifier);
        let ttl = ttl
            .or(self.config.default_ttl)
            .filter(|ttl| !ttl.is_zero());

        trace!(identifier = %identifier, ttl = ?ttl, "storing link");
        let outcome = match ttl {
            Some(ttl) => self.store.put_with_expiry(&key, url, ttl).await,
            None => self.store.put(&key, url).await,
        };

        match outcome {
            Ok(()) => {
                debug!(identifier = %identifier, "link created");
                Ok(identifier)
            }
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "store write failed");
                Err(RegistryError::Create(e))
            }
        }
    }

    /// Resolves an identifier to its original URL.
    ///
    /// An absent entry (never created, evicted by TTL, or deleted) fails
    /// with [`RegistryError::NotFound`] carrying the identifier.
    pub async fn resolve(&self, identifier: &str) -> Result<String> {
        let key = self.key_for(identifier);
        trace!(identifier = %identifier, "resolving link");

        match self.store.get(&key).await {
            Ok(Some(url)) => {
                debug!(identifier = %identifier, "link resolved");
                Ok(url)
            }
            Ok(None) => {
                trace!(identifier = %identifier, "link not found");
                Err(RegistryError::NotFound(identifier.to_string()))
            }
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "store read failed");
                Err(RegistryError::Resolve(e))
            }
        }
    }

    /// Deletes an identifier's entry.
    ///
    /// Returns `true` iff the store removed a key. Idempotent: deleting a
    /// non-existent identifier returns `false`, not an error.
    pub async fn delete(&self, identifier: &str) -> Result<bool> {
        let key = self.key_for(identifier);
        trace!(identifier = %identifier, "deleting link");

        match self.store.remove(&key).await {
            Ok(removed) => {
                debug!(identifier = %identifier, removed, "link delete finished");
                Ok(removed > 0)
            }
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "store delete failed");
                Err(RegistryError::Delete(e))
            }
        }
    }

    /// Deletes every entry under this registry's prefix, regardless of TTL.
    ///
    /// Scans for `{prefix}*`, then removes all matches in one batched round
    /// trip. Returns the number of delete operations that removed at least
    /// one key; a key that expired between the scan and the batch reports
    /// 0 and is not counted. Destructive and registry-wide, with no
    /// confirmation step.
    pub async fn flush_all(&self) -> Result<u64> {
        let pattern = format!("{}*", self.config.prefix);
        trace!(pattern = %pattern, "scanning links for flush");

        let keys = self
            .store
            .scan_keys(&pattern)
            .await
            .map_err(RegistryError::Flush)?;
        if keys.is_empty() {
            debug!("no links to flush");
            return Ok(0);
        }

        let outcomes = self
            .store
            .remove_batch(&keys)
            .await
            .map_err(RegistryError::Flush)?;
        let flushed = outcomes.iter().filter(|&&removed| removed > 0).count() as u64;

        debug!(flushed, scanned = keys.len(), "flushed links");
        Ok(flushed)
    }
}
