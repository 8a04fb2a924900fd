//! Throwaway infrastructure for integration tests.

pub mod redis;

pub use redis::RedisServer;
