use tracing::{debug, trace};

use super::{
    Direction, EmptySubtreeRoots, LeafIndex, MerkleError, MerkleNode, MerklePath,
    MerklePathItem, MerkleProof, NodeRef,
};
use crate::{Map, SMT_MAX_DEPTH, hash::MerkleHasher};


// SPARSE MERKLE TREE
// ================================================================================================

/// A sparse Merkle tree of fixed depth.
///
/// The tree addresses `2^depth` leaves by their `u64` index. Leaves that were never written to
/// hold the zero digest supplied at construction, and subtrees made of such leaves are never
/// materialized: their digests come from a table of [EmptySubtreeRoots]. Writing a leaf only
/// touches the nodes on the path from the root to that leaf.
///
/// Leaf values are committed to as they are, without being hashed first, so an opening is
/// verified against the raw value stored at the leaf.
///
/// The root is a function of the set of inserted leaves only; the order in which they were
/// inserted does not matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMerkleTree<H: MerkleHasher> {
    root: MerkleNode<H::Digest>,
    depth: u8,
    leaves: Map<LeafIndex, H::Digest>,
    empty_roots: EmptySubtreeRoots<H::Digest>,
}

impl<H: MerkleHasher> SparseMerkleTree<H> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a new empty tree of the given depth whose leaves default to `zero_digest`.
    ///
    /// # Errors
    /// Returns an error if `depth` is 0 or greater than [SMT_MAX_DEPTH].
    pub fn new(depth: u8, zero_digest: H::Digest) -> Result<Self, MerkleError> {
        if depth == 0 {
            return Err(MerkleError::DepthTooSmall(depth));
        }
        if depth > SMT_MAX_DEPTH {
            return Err(MerkleError::DepthTooBig(depth as u64));
        }

        let empty_roots = EmptySubtreeRoots::new::<H>(depth, zero_digest);
        let root = MerkleNode::new(empty_roots.entry(depth));
        debug!(depth, "created sparse merkle tree");

        Ok(Self { root, depth, leaves: Map::new(), empty_roots })
    }

    /// Returns a new tree of the given depth populated with the provided `(index, value)` pairs.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `depth` is invalid, see [Self::new()].
    /// - any index does not fit into `depth` bits.
    /// - the same index is provided more than once.
    pub fn with_entries(
        depth: u8,
        zero_digest: H::Digest,
        entries: impl IntoIterator<Item = (u64, H::Digest)>,
    ) -> Result<Self, MerkleError> {
        let mut tree = Self::new(depth, zero_digest)?;
        for (index, value) in entries {
            let leaf_index = LeafIndex::new(depth, index)?;
            if tree.leaves.contains_key(&leaf_index) {
                return Err(MerkleError::DuplicateValuesForIndex(index));
            }
            tree.insert_leaf(leaf_index, value);
        }

        Ok(tree)
    }

    /// Returns a tree in which every one of the `2^depth` leaves is populated, leaf `i` holding
    /// `i` embedded as a field element.
    ///
    /// Leaves are inserted in ascending index order. This is meant for building reproducible test
    /// fixtures and is only practical for small depths.
    ///
    /// # Errors
    /// Returns an error if `depth` is invalid, see [Self::new()].
    pub fn dense(depth: u8, zero_digest: H::Digest) -> Result<Self, MerkleError> {
        let mut tree = Self::new(depth, zero_digest)?;
        for index in 0..=tree.max_index() {
            tree.insert(index, H::embed(index))?;
        }

        Ok(tree)
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the depth of this tree.
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Returns the root of this tree.
    pub fn root(&self) -> H::Digest {
        self.root.data()
    }

    /// Returns the digest of a leaf that was never written to.
    pub fn zero_digest(&self) -> H::Digest {
        self.empty_roots.zero_digest()
    }

    /// Returns the root of an empty subtree of the given height, or `None` if `height` is greater
    /// than the depth of this tree.
    pub fn empty_root(&self, height: u8) -> Option<H::Digest> {
        self.empty_roots.get(height)
    }

    /// Returns the largest index addressable in this tree.
    pub fn max_index(&self) -> u64 {
        u64::MAX >> (u64::BITS - self.depth as u32)
    }

    /// Returns the value inserted at `index`, or `None` if nothing was inserted there.
    pub fn get_leaf(&self, index: u64) -> Option<H::Digest> {
        let index = LeafIndex::new(self.depth, index).ok()?;
        self.leaves.get(&index).copied()
    }

    /// Returns `true` if a value was inserted at `index`.
    pub fn contains_leaf(&self, index: u64) -> bool {
        self.get_leaf(index).is_some()
    }

    /// Returns the number of leaves that were explicitly inserted.
    pub fn num_leaves(&self) -> usize {
        self.leaves.len()
    }

    /// Returns an iterator over the inserted leaves, ordered by ascending index.
    pub fn leaves(&self) -> impl Iterator<Item = (LeafIndex, H::Digest)> + '_ {
        self.leaves.iter().map(|(index, value)| (*index, *value))
    }

    /// Returns the root node of this tree.
    pub fn root_node(&self) -> &MerkleNode<H::Digest> {
        &self.root
    }

    // STATE MUTATORS
    // --------------------------------------------------------------------------------------------

    /// Inserts `value` at `index`, replacing any previous value, and updates the root.
    ///
    /// # Errors
    /// Returns [MerkleError::OutOfRange] if `index` does not fit into `depth` bits. The tree is not
    /// modified in that case.
    pub fn insert(&mut self, index: u64, value: H::Digest) -> Result<(), MerkleError> {
        let index = LeafIndex::new(self.depth, index).inspect_err(|err| {
            debug!(depth = self.depth, index, %err, "rejected leaf insertion");
        })?;
        self.insert_leaf(index, value);

        Ok(())
    }

    /// Writes a validated leaf and rehashes its path up to the root.
    fn insert_leaf(&mut self, index: LeafIndex, value: H::Digest) {
        self.leaves.insert(index, value);
        Self::insert_into_node(&mut self.root, index, value, 0, &self.empty_roots);
        trace!(%index, "inserted leaf");
    }

    fn insert_into_node(
        node: &mut MerkleNode<H::Digest>,
        index: LeafIndex,
        value: H::Digest,
        level: u8,
        empty_roots: &EmptySubtreeRoots<H::Digest>,
    ) {
        if level == index.depth() {
            node.set_data(value);
            return;
        }

        let depth_below = index.depth() - level - 1;
        let empty_child = empty_roots.entry(depth_below);
        let child = node.child_mut_or_insert(index.direction_at(level), empty_child);
        Self::insert_into_node(child, index, value, level + 1, empty_roots);
        node.rehash::<H>(empty_child);
    }

    // PROOFS
    // --------------------------------------------------------------------------------------------

    /// Returns the Merkle path of the leaf at `index`, ordered from the leaf towards the root.
    ///
    /// # Errors
    /// Returns [MerkleError::NotFound] if no value was inserted at `index`, including when `index`
    /// is outside of the tree.
    pub fn generate_merkle_path(&self, index: u64) -> Result<MerklePath<H::Digest>, MerkleError> {
        let leaf_index = self.inserted_leaf_index(index)?;

        let mut items = Vec::with_capacity(self.depth as usize);
        let mut current = NodeRef::Materialized(&self.root);
        for (level, direction) in leaf_index.directions().enumerate() {
            let depth_below = self.depth - level as u8 - 1;
            let sibling_side = direction.opposite();
            let sibling = current.get_child(sibling_side, depth_below, &self.empty_roots);
            items.push(MerklePathItem::new(sibling.data(), sibling_side == Direction::Right));
            current = current.get_child(direction, depth_below, &self.empty_roots);
        }
        debug_assert_eq!(Some(current.data()), self.leaves.get(&leaf_index).copied());

        items.reverse();
        trace!(%leaf_index, "generated merkle path");

        Ok(MerklePath::new(items))
    }

    /// Returns the value at `index` together with its Merkle path.
    ///
    /// # Errors
    /// Returns [MerkleError::NotFound] if no value was inserted at `index`.
    pub fn open(&self, index: u64) -> Result<MerkleProof<H::Digest>, MerkleError> {
        let path = self.generate_merkle_path(index)?;
        let value = self.get_leaf(index).ok_or(MerkleError::NotFound(index))?;

        Ok(MerkleProof::new(value, path))
    }

    // HELPERS
    // --------------------------------------------------------------------------------------------

    fn inserted_leaf_index(&self, index: u64) -> Result<LeafIndex, MerkleError> {
        match LeafIndex::new(self.depth, index) {
            Ok(leaf_index) if self.leaves.contains_key(&leaf_index) => Ok(leaf_index),
            _ => {
                debug!(depth = self.depth, index, "no leaf to open");
                Err(MerkleError::NotFound(index))
            },
        }
    }
}
