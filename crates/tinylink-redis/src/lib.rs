//! Redis backend for the tinylink link registry.
//!
//! Provides [`RedisLinkStore`], an implementation of the
//! [`LinkStore`](tinylink_core::LinkStore) capability over a multiplexed
//! Redis connection.

pub mod store;

pub use store::RedisLinkStore;
