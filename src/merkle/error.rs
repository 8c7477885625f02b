use thiserror::Error;

use crate::SMT_MAX_DEPTH;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MerkleError {
    #[error("provided merkle tree depth {0} is too small")]
    DepthTooSmall(u8),
    #[error("provided merkle tree depth {0} is too big, the maximum is {SMT_MAX_DEPTH}")]
    DepthTooBig(u64),
    #[error("leaf index {value} is out of range for a tree of depth {depth}")]
    OutOfRange { depth: u8, value: u64 },
    #[error("no leaf exists at index {0}")]
    NotFound(u64),
    #[error("merkle path length {actual} does not match tree depth {expected}")]
    LengthMismatch { expected: u8, actual: usize },
    #[error("computed merkle root does not match the expected root")]
    ConflictingRoots,
    #[error("multiple values provided for merkle tree index {0}")]
    DuplicateValuesForIndex(u64),
}
