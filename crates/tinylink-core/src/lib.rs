//! Core types and traits for the tinylink link registry.
//!
//! This crate provides the store capability trait, identifier generation,
//! the error taxonomy, and the [`LinkRegistry`] facade itself. Backend
//! implementations (e.g. Redis) live in sibling crates.

pub mod error;
pub mod generator;
pub mod registry;
pub mod store;

pub use error::{RegistryError, StoreError};
pub use generator::{IdGenerator, NanoIdGenerator, SequentialGenerator};
pub use registry::{LinkRegistry, RegistryConfig};
pub use store::{memory::InMemoryLinkStore, LinkStore};
