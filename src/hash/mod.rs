//! Two-to-one compression functions used to commit to tree nodes.

use core::fmt::Debug;

mod poseidon;
pub use poseidon::{POSEIDON_MAX_INPUTS, Poseidon254, PoseidonError};

#[cfg(feature = "rpo")]
mod rpo;
#[cfg(feature = "rpo")]
pub use rpo::{Felt, Rpo256, RpoDigest};

// MERKLE HASHER
// ================================================================================================

/// A hash function which can be used to build a sparse Merkle tree.
///
/// Implementations must be deterministic and total: every pair of digests compresses to a digest,
/// and the same inputs always produce the same output.
pub trait MerkleHasher {
    /// A field element in the domain of this hash function. Nodes, leaves and path siblings are
    /// all represented by this type.
    type Digest: Copy + Debug + Eq;

    /// Combines the digests of a left and a right child into the digest of their parent.
    fn compress(left: Self::Digest, right: Self::Digest) -> Self::Digest;

    /// Embeds an integer into the field without hashing it.
    fn embed(value: u64) -> Self::Digest;

    /// Hashes a single integer, usually to derive the digest of an empty leaf, e.g. `H(0)`.
    fn hash_element(value: u64) -> Self::Digest;
}
