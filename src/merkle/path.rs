use core::ops::Deref;

use super::MerkleError;
use crate::hash::MerkleHasher;

// MERKLE PATH ITEM
// ================================================================================================

/// One level of a Merkle path: the digest of the sibling of the node being authenticated and the
/// side the sibling is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MerklePathItem<D> {
    /// Digest of the sibling subtree.
    pub sibling_hash: D,
    /// `true` if the sibling is the right child, i.e. the authenticated node is the left operand.
    pub is_right_sibling: bool,
}

impl<D: Copy> MerklePathItem<D> {
    /// Returns a new path item for a sibling on the right if `is_right_sibling` is set.
    pub fn new(sibling_hash: D, is_right_sibling: bool) -> Self {
        Self { sibling_hash, is_right_sibling }
    }

    /// Computes the parent of `node` and the sibling held by this item.
    pub fn parent<H>(&self, node: D) -> D
    where
        H: MerkleHasher<Digest = D>,
    {
        if self.is_right_sibling {
            H::compress(node, self.sibling_hash)
        } else {
            H::compress(self.sibling_hash, node)
        }
    }
}

// MERKLE PATH
// ================================================================================================

/// An inclusion proof for a single leaf, composed of one [MerklePathItem] per tree level.
///
/// Indexing into this type starts at the deepest part of the path and gets shallower. That is,
/// the item at index `0` is the sibling of the leaf and the last item is a child of the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerklePath<D> {
    items: Vec<MerklePathItem<D>>,
}

impl<D: Copy + Eq> MerklePath<D> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Creates a new Merkle path from items ordered from the leaf towards the root.
    pub fn new(items: Vec<MerklePathItem<D>>) -> Self {
        Self { items }
    }

    // PROVIDERS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of levels this path authenticates.
    pub fn depth(&self) -> usize {
        self.items.len()
    }

    /// Returns the items of this path, ordered from the leaf towards the root.
    pub fn items(&self) -> &[MerklePathItem<D>] {
        &self.items
    }

    /// Computes the root committed to by this path when opened at `leaf`.
    pub fn compute_root<H>(&self, leaf: D) -> D
    where
        H: MerkleHasher<Digest = D>,
    {
        compute_root::<H>(leaf, &self.items)
    }

    /// Verifies that this path opens a tree of the given depth with the provided root at `leaf`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the number of items in the path differs from `depth`.
    /// - the root computed from the path differs from `root`.
    pub fn verify<H>(&self, depth: u8, leaf: D, root: D) -> Result<(), MerkleError>
    where
        H: MerkleHasher<Digest = D>,
    {
        check_path_length(&self.items, depth)?;
        if self.compute_root::<H>(leaf) != root {
            return Err(MerkleError::ConflictingRoots);
        }

        Ok(())
    }
}

// VERIFICATION
// ================================================================================================

/// Returns `true` if `path` authenticates `leaf` against `expected_root` in a tree of the given
/// depth.
///
/// This does not need access to the tree. A path whose length differs from `depth` is rejected
/// without being folded.
pub fn verify_merkle_path<H: MerkleHasher>(
    leaf: H::Digest,
    path: &[MerklePathItem<H::Digest>],
    expected_root: H::Digest,
    depth: u8,
) -> bool {
    check_path_length(path, depth).is_ok() && compute_root::<H>(leaf, path) == expected_root
}

fn compute_root<H: MerkleHasher>(
    leaf: H::Digest,
    items: &[MerklePathItem<H::Digest>],
) -> H::Digest {
    items.iter().fold(leaf, |node, item| item.parent::<H>(node))
}

fn check_path_length<D>(items: &[MerklePathItem<D>], depth: u8) -> Result<(), MerkleError> {
    if items.len() != depth as usize {
        return Err(MerkleError::LengthMismatch { expected: depth, actual: items.len() });
    }

    Ok(())
}

// CONVERSIONS
// ================================================================================================

impl<D> From<MerklePath<D>> for Vec<MerklePathItem<D>> {
    fn from(path: MerklePath<D>) -> Self {
        path.items
    }
}

impl<D> From<Vec<MerklePathItem<D>>> for MerklePath<D> {
    fn from(items: Vec<MerklePathItem<D>>) -> Self {
        Self { items }
    }
}

impl<D> Deref for MerklePath<D> {
    type Target = [MerklePathItem<D>];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

// ITERATORS
// ================================================================================================

impl<D> FromIterator<MerklePathItem<D>> for MerklePath<D> {
    fn from_iter<T: IntoIterator<Item = MerklePathItem<D>>>(iter: T) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl<D> IntoIterator for MerklePath<D> {
    type Item = MerklePathItem<D>;
    type IntoIter = std::vec::IntoIter<MerklePathItem<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, D> IntoIterator for &'a MerklePath<D> {
    type Item = &'a MerklePathItem<D>;
    type IntoIter = core::slice::Iter<'a, MerklePathItem<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// MERKLE PROOF
// ================================================================================================

/// A leaf value together with its [MerklePath] opening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof<D> {
    /// The leaf value opened by `path`.
    pub value: D,
    /// The path from `value` to the root (exclusive).
    pub path: MerklePath<D>,
}

impl<D: Copy + Eq> MerkleProof<D> {
    /// Returns a new [MerkleProof] instantiated from the specified value and path.
    pub fn new(value: D, path: MerklePath<D>) -> Self {
        Self { value, path }
    }

    /// Verifies this proof against the root of a tree of the given depth.
    ///
    /// # Errors
    /// See [MerklePath::verify].
    pub fn verify<H>(&self, depth: u8, root: D) -> Result<(), MerkleError>
    where
        H: MerkleHasher<Digest = D>,
    {
        self.path.verify::<H>(depth, self.value, root)
    }
}

impl<D> From<(MerklePath<D>, D)> for MerkleProof<D> {
    fn from((path, value): (MerklePath<D>, D)) -> Self {
        Self { value, path }
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{Fr, hash::Poseidon254};

    fn node(value: u64) -> Fr {
        Poseidon254::embed(value)
    }

    #[test]
    fn fold_respects_sibling_side() {
        let path = MerklePath::new(vec![
            MerklePathItem::new(node(2), true),
            MerklePathItem::new(node(3), false),
        ]);

        let expected = Poseidon254::compress(node(3), Poseidon254::compress(node(1), node(2)));
        assert_eq!(path.compute_root::<Poseidon254>(node(1)), expected);
    }

    #[test]
    fn verify_rejects_length_mismatch() {
        let path = MerklePath::new(vec![MerklePathItem::new(node(2), true)]);
        let root = path.compute_root::<Poseidon254>(node(1));

        assert_matches!(path.verify::<Poseidon254>(1, node(1), root), Ok(()));
        assert_matches!(
            path.verify::<Poseidon254>(2, node(1), root),
            Err(MerkleError::LengthMismatch { expected: 2, actual: 1 })
        );
        assert!(!verify_merkle_path::<Poseidon254>(node(1), &path, root, 0));
        assert!(!verify_merkle_path::<Poseidon254>(node(1), &path, root, 2));
    }

    #[test]
    fn verify_rejects_wrong_root() {
        let path = MerklePath::new(vec![MerklePathItem::new(node(2), false)]);
        let root = path.compute_root::<Poseidon254>(node(1));

        assert_matches!(
            path.verify::<Poseidon254>(1, node(4), root),
            Err(MerkleError::ConflictingRoots)
        );
        let proof = MerkleProof::from((path, node(1)));
        assert_matches!(proof.verify::<Poseidon254>(1, root), Ok(()));
    }
}
