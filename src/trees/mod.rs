//! This module contains the tree types, and the [`SomeTree`] trait that they share.
//!
//! [`basic_tree::BasicTree`] is the unbalanced binary search tree that owns all the nodes.
//! [`splay::SplayTree`] wraps a basic tree and restructures it on every access.

pub mod basic_tree;
pub mod splay;

use crate::error::InvariantError;
use basic_tree::BasicTree;

/// The side of a son relative to its parent.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Side {
    Left,
    Right,
}

impl std::ops::Not for Side {
    type Output = Side;
    fn not(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// An opaque handle to a node inside a tree's arena.
///
/// A handle stays valid until the node it names is removed from the tree.
/// After that, the slot may be reused by a later insertion.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The index of the node's slot in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The operations shared by all the trees in this crate.
///
/// `search` takes `&mut self`, since self adjusting trees restructure
/// themselves on every access, including unsuccessful searches.
pub trait SomeTree<K: Ord>: Default + std::iter::FromIterator<K> {
    fn new() -> Self {
        Default::default()
    }

    /// Returns the node holding `key`, or [`None`].
    fn search(&mut self, key: &K) -> Option<NodeId>;

    /// Inserts `value`, unless an equal value is already present.
    /// In both cases returns the node holding the value.
    fn insert(&mut self, value: K) -> NodeId;

    /// Removes the value equal to `key` and returns it.
    /// Does nothing if there is no such value.
    fn delete(&mut self, key: &K) -> Option<K>;

    /// The underlying basic tree, for read only inspection.
    fn inner(&self) -> &BasicTree<K>;

    fn contains(&mut self, key: &K) -> bool {
        self.search(key).is_some()
    }

    fn size(&self) -> usize {
        self.inner().size()
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Checks every structural invariant of the tree.
    fn validate(&self) -> Result<(), InvariantError> {
        self.inner().validate()
    }

    /// Checks that invariants remain correct. Otherwise, panics.
    fn assert_correctness(&self) {
        if let Err(err) = self.validate() {
            panic!("tree invariant violated: {}", err);
        }
    }
}
