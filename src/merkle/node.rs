use super::{Direction, EmptySubtreeRoots};
use crate::hash::MerkleHasher;

// MERKLE NODE
// ================================================================================================

/// A materialized node of a sparse Merkle tree.
///
/// Inner nodes cache the commitment to their subtree, leaf nodes hold the leaf value itself. A
/// child that was never written to is not stored and stands for an empty subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleNode<D> {
    data: D,
    left: Option<Box<MerkleNode<D>>>,
    right: Option<Box<MerkleNode<D>>>,
}

impl<D: Copy> MerkleNode<D> {
    /// Creates a node without children.
    pub fn new(data: D) -> Self {
        Self { data, left: None, right: None }
    }

    /// Returns the digest cached in this node.
    pub fn data(&self) -> D {
        self.data
    }

    /// Returns the materialized child on the given side, if any.
    pub fn child(&self, direction: Direction) -> Option<&MerkleNode<D>> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }

    /// Returns the child on the given side, falling back to a virtual empty subtree of height
    /// `depth_below` when the child was never materialized.
    pub fn get_child(
        &self,
        direction: Direction,
        depth_below: u8,
        empty_roots: &EmptySubtreeRoots<D>,
    ) -> NodeRef<'_, D> {
        match self.child(direction) {
            Some(child) => NodeRef::Materialized(child),
            None => NodeRef::Empty(empty_roots.entry(depth_below)),
        }
    }

    // STATE MUTATORS
    // --------------------------------------------------------------------------------------------

    pub(super) fn set_data(&mut self, data: D) {
        self.data = data;
    }

    /// Returns the child on the given side, materializing it with `placeholder` as its digest if
    /// it is absent.
    pub(super) fn child_mut_or_insert(
        &mut self,
        direction: Direction,
        placeholder: D,
    ) -> &mut MerkleNode<D> {
        let slot = match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        slot.get_or_insert_with(|| Box::new(MerkleNode::new(placeholder)))
    }

    /// Recomputes the digest of this node from its children, with `empty_child` standing in for a
    /// missing side.
    pub(super) fn rehash<H>(&mut self, empty_child: D)
    where
        H: MerkleHasher<Digest = D>,
    {
        let left = self.left.as_ref().map_or(empty_child, |node| node.data);
        let right = self.right.as_ref().map_or(empty_child, |node| node.data);
        self.data = H::compress(left, right);
    }
}

// NODE REFERENCE
// ================================================================================================

/// A view of a node which is either materialized in the tree or a virtual empty subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a, D> {
    Materialized(&'a MerkleNode<D>),
    /// The root of an all-empty subtree. It has no children of its own.
    Empty(D),
}

impl<'a, D: Copy> NodeRef<'a, D> {
    /// Returns the digest of the referenced node.
    pub fn data(&self) -> D {
        match *self {
            NodeRef::Materialized(node) => node.data(),
            NodeRef::Empty(digest) => digest,
        }
    }

    /// Returns `true` if this is a virtual empty subtree.
    pub fn is_empty(&self) -> bool {
        matches!(self, NodeRef::Empty(_))
    }

    /// Navigates to a child; children of an empty subtree are empty subtrees one level lower.
    pub fn get_child(
        &self,
        direction: Direction,
        depth_below: u8,
        empty_roots: &EmptySubtreeRoots<D>,
    ) -> NodeRef<'a, D> {
        match *self {
            NodeRef::Materialized(node) => node.get_child(direction, depth_below, empty_roots),
            NodeRef::Empty(_) => NodeRef::Empty(empty_roots.entry(depth_below)),
        }
    }
}

// TESTS
// ================================================================================================
