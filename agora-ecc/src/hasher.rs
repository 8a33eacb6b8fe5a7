use num_bigint::BigUint;
use sha3::{Digest, Sha3_256};

/// Incremental message hasher whose digest is read as a big-endian integer.
pub struct MessageHasher<D: Digest = Sha3_256> {
    hasher: D,
}

impl<D: Digest> MessageHasher<D> {
    pub fn new() -> Self {
        Self { hasher: D::new() }
    }

    pub fn insert(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    pub fn finalize(self) -> BigUint {
        BigUint::from_bytes_be(&self.hasher.finalize())
    }

    /// One-shot hash of `message`.
    pub fn hash(message: &[u8]) -> BigUint {
        let mut hasher = Self::new();
        hasher.insert(message);
        hasher.finalize()
    }
}

impl<D: Digest> Default for MessageHasher<D> {
    fn default() -> Self {
        Self::new()
    }
}
