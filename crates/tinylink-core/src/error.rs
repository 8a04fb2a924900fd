use thiserror::Error;

/// Errors raised by [`LinkStore`](crate::store::LinkStore) implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Errors raised by the link registry, discriminated by the failed operation.
///
/// Each operation wraps the underlying [`StoreError`] exactly once; the
/// original message stays reachable through `Display` and `source()`, so
/// callers can branch on the variant instead of parsing message text.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("failed to create link: {0}")]
    Create(#[source] StoreError),
    #[error("failed to resolve link: {0}")]
    Resolve(#[source] StoreError),
    #[error("failed to delete link: {0}")]
    Delete(#[source] StoreError),
    #[error("failed to flush links: {0}")]
    Flush(#[source] StoreError),
    /// The identifier has no live entry: never created, expired, or deleted.
    #[error("link not found: {0}")]
    NotFound(String),
}
