//! Data structures related to sparse Merkle trees.

// SUBMODULES
// ================================================================================================

mod empty_roots;
mod error;
mod index;
mod node;
mod path;
mod smt;

// REEXPORTS
// ================================================================================================

pub use empty_roots::{EmptySubtreeRoots, empty_hash};
pub use error::MerkleError;
pub use index::{Direction, LeafIndex};
pub use node::{MerkleNode, NodeRef};
pub use path::{MerklePath, MerklePathItem, MerkleProof, verify_merkle_path};
pub use smt::SparseMerkleTree;
