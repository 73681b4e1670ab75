//! Errors reported by the structural checks of the trees.
//!
//! None of the tree operations fail at runtime: misses are reported with
//! [`Option`]. These errors only come out of `validate`, and describe a tree
//! whose internal structure has been corrupted.

use crate::trees::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("the root {root:?} has a parent link")]
    RootHasParent { root: NodeId },

    #[error("node {child:?} is a son of {node:?}, but its parent link is {found:?}")]
    BrokenParentLink {
        node: NodeId,
        child: NodeId,
        found: Option<NodeId>,
    },

    #[error("in-order traversal is not strictly increasing at node {node:?}")]
    OrderViolation { node: NodeId },

    #[error("node {node:?} stores height {stored}, but its sons imply {expected}")]
    HeightMismatch {
        node: NodeId,
        stored: i32,
        expected: i32,
    },

    #[error("tree records {recorded} nodes, but {reachable} are reachable from the root")]
    SizeMismatch { recorded: usize, reachable: usize },

    #[error("node {node:?} was reached twice, the tree contains a cycle")]
    Cycle { node: NodeId },

    #[error("node {node:?} is referenced but not allocated")]
    Dangling { node: NodeId },
}
