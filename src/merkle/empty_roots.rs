use crate::hash::MerkleHasher;

// EMPTY SUBTREE ROOTS
// ================================================================================================

/// The digests of all-empty subtrees for every height up to some maximum.
///
/// The entry at height `0` is the digest of an empty leaf, and the entry at height `h` is the
/// compression of two empty subtrees of height `h - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptySubtreeRoots<D> {
    roots: Vec<D>,
}

impl<D: Copy> EmptySubtreeRoots<D> {
    /// Computes the empty subtree roots for heights `0..=max_height` starting from the digest of
    /// an empty leaf.
    pub fn new<H>(max_height: u8, zero_digest: D) -> Self
    where
        H: MerkleHasher<Digest = D>,
    {
        let mut roots = Vec::with_capacity(max_height as usize + 1);
        let mut node = zero_digest;
        roots.push(node);
        for _ in 0..max_height {
            node = H::compress(node, node);
            roots.push(node);
        }

        Self { roots }
    }

    /// Returns the root of an empty subtree of the given height.
    ///
    /// # Panics
    /// Panics if `height` is greater than [Self::max_height()].
    pub fn entry(&self, height: u8) -> D {
        self.roots[height as usize]
    }

    /// Returns the root of an empty subtree of the given height, or `None` if the table was not
    /// built that high.
    pub fn get(&self, height: u8) -> Option<D> {
        self.roots.get(height as usize).copied()
    }

    /// Returns the digest of an empty leaf.
    pub fn zero_digest(&self) -> D {
        self.roots[0]
    }

    /// Returns the largest height this table has an entry for.
    pub fn max_height(&self) -> u8 {
        (self.roots.len() - 1) as u8
    }

    /// Returns the roots ordered from height `0` upwards.
    pub fn as_slice(&self) -> &[D] {
        &self.roots
    }
}

/// Computes the root of an empty subtree of the given height without caching intermediate values.
pub fn empty_hash<H: MerkleHasher>(height: u8, zero_digest: H::Digest) -> H::Digest {
    (0..height).fold(zero_digest, |node, _| H::compress(node, node))
}

// TESTS
// ================================================================================================
