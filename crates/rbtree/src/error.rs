use std::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by fallible tree operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node storage allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
    #[error("node storage exceeds u32 slot indices")]
    CapacityOverflow,
    #[error("node handle is stale (erased or cleared)")]
    StaleNode,
    #[error("node handle belongs to another tree")]
    ForeignNode,
}

/// Red-black invariant violations reported by
/// [`RbTree::assert_valid`](crate::RbTree::assert_valid).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Root is not black")]
    RootNotBlack,
    #[error("Root has parent")]
    RootHasParent,
    #[error("Sentinel is not black")]
    SentinelNotBlack,
    #[error("Sentinel has children")]
    SentinelHasChildren,
    #[error("Sentinel has parent")]
    SentinelHasParent,
    #[error("Broken parent link at slot {0}")]
    BrokenParentLink(u32),
    #[error("Red node at slot {0} has red child")]
    RedRedViolation(u32),
    #[error("Black height mismatch at slot {0}")]
    BlackHeightMismatch(u32),
    #[error("Node order violated at slot {0}")]
    OrderViolated(u32),
    #[error("Tree holds {found} nodes, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },
}
