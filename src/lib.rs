//! Sparse Merkle trees over arithmetic-circuit friendly hash functions.
//!
//! A [SparseMerkleTree](merkle::SparseMerkleTree) commits to a fixed-depth binary keyspace of
//! `2^depth` leaves while only materializing the nodes on paths that were actually written to.
//! Inclusion proofs are plain sibling paths ([MerklePath](merkle::MerklePath)) which can be checked
//! with [verify_merkle_path](merkle::verify_merkle_path) without access to the tree.
//!
//! ```
//! use field_smt::{
//!     hash::{MerkleHasher, Poseidon254},
//!     merkle::{SparseMerkleTree, verify_merkle_path},
//! };
//!
//! let zero = Poseidon254::hash_element(0);
//! let mut tree = SparseMerkleTree::<Poseidon254>::new(8, zero).unwrap();
//!
//! let value = Poseidon254::embed(42);
//! tree.insert(5, value).unwrap();
//!
//! let path = tree.generate_merkle_path(5).unwrap();
//! assert!(verify_merkle_path::<Poseidon254>(value, &path, tree.root(), tree.depth()));
//! ```

pub mod hash;
pub mod merkle;

// RE-EXPORTS
// ================================================================================================

pub use ark_bn254::Fr;

// TYPE ALIASES
// ================================================================================================

/// An alias for a key-value map.
///
/// Ordered so that iterating the leaves of a tree yields them by ascending index.
pub type Map<K, V> = std::collections::BTreeMap<K, V>;

// CONSTANTS
// ================================================================================================

/// Maximum depth of a sparse Merkle tree. Leaf indices are `u64`, so a tree can address at most
/// `2^64` leaves.
pub const SMT_MAX_DEPTH: u8 = 64;

// TESTS
// ================================================================================================

#[test]
#[should_panic]
fn debug_assert_is_checked() {
    // some invariants of the tree are only checked with `debug_assert`, make sure the test
    // profile keeps them enabled.
    debug_assert!(false);
}
