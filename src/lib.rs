//! Binary search trees stored in an arena.
//!
//! [`BasicTree`] is a plain, unbalanced binary search tree whose shape depends
//! only on the order of insertions and deletions. [`SplayTree`] wraps a
//! [`BasicTree`] and splays every accessed node to the root, which gives
//! amortized logarithmic operations without a height invariant.
//!
//! Both trees implement [`SomeTree`], so code can be written against either.
//!
//!```
//! use sapling::{SomeTree, SplayTree};
//!
//! let mut tree: SplayTree<i32> = (1..=10).collect();
//! assert!(tree.search(&4).is_some());
//! assert_eq!(tree.root_value(), Some(&4));
//! assert_eq!(tree.delete(&4), Some(4));
//! assert_eq!(tree.size(), 9);
//! # tree.assert_correctness();
//!```

#[macro_use]
extern crate derive_destructure;

pub mod error;
pub mod trees;

pub use error::InvariantError;
pub use trees::basic_tree::{BasicNode, BasicTree, BasicWalker, Position, SearchResult};
pub use trees::splay::{SplayTree, SplayWalker};
pub use trees::*;
