//! Short id generation

use rand::Rng;
use std::fmt::Debug;

/// Characters a short id is drawn from
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of candidate short ids
///
/// The store retries on collision, so implementations need not guarantee
/// uniqueness.
pub trait IdGenerator: Send + Sync + Debug {
    /// Produce a candidate id of `length` characters
    fn generate(&self, length: usize) -> String;
}

/// Uniform random ids over [`ALPHABET`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::rng();
        (0..length)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect()
    }
}

/// Whether `id` could have come from [`RandomIdGenerator`]
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric())
}
