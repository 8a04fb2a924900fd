use std::sync::atomic::{AtomicU64, Ordering};

/// Trait for generating link identifiers.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is the generator's responsibility: the registry performs no
/// existence check before writing, so a colliding identifier silently
/// overwrites the prior entry. Callers that need guaranteed non-collision
/// must pre-check or rely on the generator's entropy.
pub trait IdGenerator: Send + Sync + 'static {
    /// Generates a fresh opaque identifier.
    fn generate(&self) -> String;
}

/// Default identifier length, matching the nanoid default.
const DEFAULT_LENGTH: usize = 21;

/// A random identifier generator backed by nanoid.
///
/// Produces URL-safe identifiers from a 64-character alphabet. At the
/// default length of 21 the collision probability is negligible for
/// practical workloads.
#[derive(Debug, Clone)]
pub struct NanoIdGenerator {
    length: usize,
}

impl NanoIdGenerator {
    /// Creates a generator producing identifiers of the default length.
    pub fn new() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }

    /// Creates a generator producing identifiers of a custom length.
    ///
    /// Shorter identifiers trade collision resistance for brevity.
    pub fn with_length(length: usize) -> Self {
        Self { length }
    }
}

impl Default for NanoIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for NanoIdGenerator {
    fn generate(&self) -> String {
        nanoid::format(nanoid::rngs::default, &nanoid::alphabet::SAFE, self.length)
    }
}

/// A deterministic generator using a prefixed sequential counter.
///
/// Collision free within a single instance, which makes it suitable for
/// tests and single-node embedded use. For multiple instances over one
/// store, give each a unique prefix.
#[derive(Debug)]
pub struct SequentialGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SequentialGenerator {
    /// Creates a new sequential generator with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }
}

impl Clone for SequentialGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl IdGenerator for SequentialGenerator {
    fn generate(&self) -> String {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}{:06}", self.prefix, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nanoid_generator_default_length() {
        let generator = NanoIdGenerator::new();

        let id = generator.generate();
        assert_eq!(id.len(), 21);
    }

    #[test]
    fn nanoid_generator_custom_length() {
        let generator = NanoIdGenerator::with_length(8);

        let id = generator.generate();
        assert_eq!(id.len(), 8);
    }

    #[test]
    fn nanoid_generator_produces_distinct_ids() {
        let generator = NanoIdGenerator::new();

        let first = generator.generate();
        let second = generator.generate();

        assert_ne!(first, second);
    }

    #[test]
    fn sequential_generator_produces_sequential_ids() {
        let generator = SequentialGenerator::with_prefix("id");

        assert_eq!(generator.generate(), "id000000");
        assert_eq!(generator.generate(), "id000001");
        assert_eq!(generator.generate(), "id000002");
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NanoIdGenerator>();
        assert_send_sync::<SequentialGenerator>();
    }
}
