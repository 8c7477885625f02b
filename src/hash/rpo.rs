use winter_crypto::{ElementHasher, Hasher, hashers::Rp64_256};
use winter_math::FieldElement;
pub use winter_math::fields::f64::BaseElement as Felt;

use super::MerkleHasher;

/// Digest of the RPO-256 hash function, four elements of the 64-bit Goldilocks field.
pub type RpoDigest = <Rp64_256 as Hasher>::Digest;

// RESCUE PRIME OPTIMIZED
// ================================================================================================

/// Rescue Prime Optimized with a 256-bit output over the 64-bit Goldilocks field.
///
/// Leaves and nodes are full digests of four field elements; [MerkleHasher::embed] places the
/// integer in the first element and pads the rest with zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rpo256;

impl MerkleHasher for Rpo256 {
    type Digest = RpoDigest;

    fn compress(left: RpoDigest, right: RpoDigest) -> RpoDigest {
        Rp64_256::merge(&[left, right])
    }

    fn embed(value: u64) -> RpoDigest {
        RpoDigest::new([Felt::new(value), Felt::ZERO, Felt::ZERO, Felt::ZERO])
    }

    fn hash_element(value: u64) -> RpoDigest {
        Rp64_256::hash_elements(&[Felt::new(value)])
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_matches_merge() {
        let a = Rpo256::hash_element(1);
        let b = Rpo256::hash_element(2);

        assert_eq!(Rpo256::compress(a, b), Rp64_256::merge(&[a, b]));
        assert_ne!(Rpo256::compress(a, b), Rpo256::compress(b, a));
    }

    #[test]
    fn embed_pads_with_zeros() {
        let digest = Rpo256::embed(7);
        assert_eq!(digest.as_elements(), &[Felt::new(7), Felt::ZERO, Felt::ZERO, Felt::ZERO]);
    }
}
