use core::fmt::{self, Display};

use super::MerkleError;
use crate::SMT_MAX_DEPTH;

// DIRECTION
// ================================================================================================

/// The side of a parent node a child hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Returns the other side.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl From<bool> for Direction {
    /// `true` (a set key bit) selects the right child.
    fn from(bit: bool) -> Self {
        if bit { Direction::Right } else { Direction::Left }
    }
}

// LEAF INDEX
// ================================================================================================

/// The position of a leaf in a tree of a given depth.
///
/// The index doubles as the key of the leaf: read most-significant bit first, its `depth` bits
/// describe the path from the root, with `0` selecting the left child and `1` the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LeafIndex {
    depth: u8,
    value: u64,
}

impl LeafIndex {
    /// Creates a new leaf index for a tree of the given depth.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `depth` is zero or greater than [SMT_MAX_DEPTH].
    /// - `value` does not fit into `depth` bits.
    pub fn new(depth: u8, value: u64) -> Result<Self, MerkleError> {
        if depth == 0 {
            return Err(MerkleError::DepthTooSmall(depth));
        }
        if depth > SMT_MAX_DEPTH {
            return Err(MerkleError::DepthTooBig(depth as u64));
        }
        if depth < SMT_MAX_DEPTH && value >> depth != 0 {
            return Err(MerkleError::OutOfRange { depth, value });
        }

        Ok(Self { depth, value })
    }

    /// Returns the depth of the tree this index addresses a leaf of.
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Returns the numeric value of this index.
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Returns the key bit read at `level`, where level `0` is the branch taken at the root.
    ///
    /// # Panics
    /// Panics in debug builds if `level` is not smaller than the depth.
    pub fn bit_at(&self, level: u8) -> bool {
        debug_assert!(level < self.depth, "level {level} is past the leaves");
        (self.value >> (self.depth - 1 - level)) & 1 == 1
    }

    /// Returns the child taken at `level` when walking from the root to this leaf.
    pub fn direction_at(&self, level: u8) -> Direction {
        Direction::from(self.bit_at(level))
    }

    /// Returns an iterator over the branches from the root to this leaf.
    pub fn directions(&self) -> impl ExactSizeIterator<Item = Direction> + '_ {
        (0..self.depth).map(|level| self.direction_at(level))
    }
}

impl Display for LeafIndex {
    /// Renders the key as a zero-padded binary string of exactly `depth` characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.depth as usize)
    }
}

// TESTS
// ================================================================================================
