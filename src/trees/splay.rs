//! An implementation of a splay tree.
//!
//! Every search moves the node it found to the root, using rotations.
//! An unsuccessful search moves the last node it visited to the root instead.
//! This gives amortized `O(log n)` time for every operation, without keeping
//! any balancing invariant.

use super::basic_tree::{self, BasicNode, BasicTree, BasicWalker, Position};
use super::*;

pub struct SplayTree<K> {
    tree: BasicTree<K>,
}

impl<K> SplayTree<K> {
    pub fn new() -> Self {
        SplayTree {
            tree: BasicTree::new(),
        }
    }

    pub fn into_inner(self) -> BasicTree<K> {
        self.tree
    }

    pub fn from_inner(tree: BasicTree<K>) -> Self {
        SplayTree { tree }
    }

    pub fn inner(&self) -> &BasicTree<K> {
        &self.tree
    }

    // note: using this directly may cause the tree to lose its properties as a splay tree
    pub fn basic_walker(&mut self) -> BasicWalker<'_, K> {
        BasicWalker::new(&mut self.tree)
    }

    /// A walker that splays its position to the root when dropped.
    pub fn walker(&mut self) -> SplayWalker<'_, K> {
        SplayWalker::new(self.basic_walker())
    }

    /// Moves `node` to the root. Does nothing if `node` isn't in the tree.
    pub fn splay(&mut self, node: NodeId) {
        if self.tree.node(node).is_none() {
            return;
        }
        let mut walker = SplayWalker::new(BasicWalker::at(&mut self.tree, Position::Node(node)));
        walker.splay();
    }

    pub fn size(&self) -> usize {
        self.tree.size()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.tree.root()
    }

    pub fn root_value(&self) -> Option<&K> {
        self.tree.root_value()
    }

    pub fn node(&self, id: NodeId) -> Option<&BasicNode<K>> {
        self.tree.node(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&K> {
        self.tree.get(id)
    }

    /// The cached height of a node. `-1` for an absent node.
    pub fn height(&self, node: Option<NodeId>) -> i32 {
        self.tree.height(node)
    }

    pub fn tree_height(&self) -> i32 {
        self.tree.tree_height()
    }

    // these don't splay, since they only take a shared reference
    pub fn first(&self) -> Option<&K> {
        self.tree.first()
    }

    pub fn last(&self) -> Option<&K> {
        self.tree.last()
    }

    pub fn iter(&self) -> basic_tree::iterators::Iter<'_, K> {
        self.tree.iter()
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }
}

impl<K: Ord> SplayTree<K> {
    /// Looks for `key`, and moves the node holding it to the root.
    /// If it isn't found, the last node on the search path is moved to the root
    /// instead, and [`None`] is returned.
    pub fn search(&mut self, key: &K) -> Option<NodeId> {
        let mut walker = self.walker();
        // the walker splays when it goes out of scope
        walker.seek(key)
    }

    pub fn contains(&mut self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Inserts `value` unless it is already present, and returns its node,
    /// which is the new root either way.
    ///
    /// A new value is inserted by splitting the root: after the search, the
    /// root is the value's nearest neighbour, and the new node takes the root's
    /// subtree on the value's side, with the old root as its other son.
    pub fn insert(&mut self, value: K) -> NodeId {
        if let Some(id) = self.search(&value) {
            return id;
        }
        let hot = match self.tree.root() {
            None => return self.tree.attach(None, value),
            Some(hot) => hot,
        };
        let side = if &value < self.tree.node_ref(hot).value() {
            Side::Left
        } else {
            Side::Right
        };

        let id = self.tree.alloc(value);
        let moved = self.tree.child_of(hot, side);
        self.tree.link(hot, side, None);
        self.tree.link(id, side, moved);
        self.tree.link(id, !side, Some(hot));
        self.tree.set_root(Some(id));
        self.tree.recompute_height(hot);
        self.tree.recompute_height(id);
        log::debug!("inserted node {:?} at the root", id);
        id
    }

    /// Removes the value equal to `key` and returns it.
    /// The search for it splays the tree even if it isn't present.
    pub fn delete(&mut self, key: &K) -> Option<K> {
        let id = self.search(key)?;
        Some(self.tree.remove_node(id))
    }
}

impl<K> Default for SplayTree<K> {
    fn default() -> Self {
        SplayTree::new()
    }
}

impl<K: Clone> Clone for SplayTree<K> {
    fn clone(&self) -> Self {
        SplayTree {
            tree: self.tree.clone(),
        }
    }
}

impl<K: Ord> SomeTree<K> for SplayTree<K> {
    fn search(&mut self, key: &K) -> Option<NodeId> {
        SplayTree::search(self, key)
    }

    fn insert(&mut self, value: K) -> NodeId {
        SplayTree::insert(self, value)
    }

    fn delete(&mut self, key: &K) -> Option<K> {
        SplayTree::delete(self, key)
    }

    fn inner(&self) -> &BasicTree<K> {
        &self.tree
    }
}

impl<K: Ord> std::iter::FromIterator<K> for SplayTree<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut tree = SplayTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for SplayTree<K> {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<K> IntoIterator for SplayTree<K> {
    type Item = K;
    type IntoIter = basic_tree::iterators::IntoIter<K>;
    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a SplayTree<K> {
    type Item = &'a K;
    type IntoIter = basic_tree::iterators::Iter<'a, K>;
    fn into_iter(self) -> Self::IntoIter {
        self.tree.iter()
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for SplayTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.tree, f)
    }
}

/// A walker for [`SplayTree`]. When dropped, it splays its position to the root.
/// If it is at an empty position, the parent of that position is splayed instead.
#[derive(destructure)]
pub struct SplayWalker<'a, K> {
    walker: BasicWalker<'a, K>,
    rotations: usize,
}

impl<'a, K> SplayWalker<'a, K> {
    pub fn new(walker: BasicWalker<'a, K>) -> Self {
        SplayWalker {
            walker,
            rotations: 0,
        }
    }

    /// Returns the underlying walker, without splaying.
    pub fn into_inner(self) -> BasicWalker<'a, K> {
        let (walker, _) = self.destructure();
        walker
    }

    pub fn go_left(&mut self) -> Result<(), ()> {
        self.walker.go_left()
    }

    pub fn go_right(&mut self) -> Result<(), ()> {
        self.walker.go_right()
    }

    // if at the root, do nothing.
    // otherwise, do a splay step upwards.

    // about the amortized computational complexity of using splay steps:
    // the amortized cost of any splay step, except the zig step near the root, is at most
    // 3 * (log(new_node.size) - log(old_node.size)) - 1
    // the -1 covers the complexity of going down the tree in the first place,
    // and therefore you pay for at most log the size of the node where you stop splaying

    // only the two rotated nodes get their heights fixed in each rotation.
    // this is enough since the splay keeps going until the node is the root,
    // and every ancestor gets rotated on the way.
    fn splay_step(&mut self) {
        let c = match self.walker.node_id() {
            None => return,
            Some(c) => c,
        };
        let tree = self.walker.inner_mut();
        let (b1, p) = match (tree.side_of(c), tree.parent_of(c)) {
            (Some(b1), Some(p)) => (b1, p),
            _ => return, // already the root
        };

        match tree.side_of(p) {
            None => {
                // zig step
                log::trace!("splay {:?}: zig", c);
                tree.rotate_up(c).expect(basic_tree::NO_PARENT_ERROR);
                self.rotations += 1;
            }
            Some(b2) if b1 == b2 => {
                log::trace!("splay {:?}: zig-zig", c);
                tree.rotate_up(p).expect(basic_tree::NO_PARENT_ERROR);
                tree.rotate_up(c).expect(basic_tree::NO_PARENT_ERROR);
                self.rotations += 2;
            }
            Some(_) => {
                log::trace!("splay {:?}: zig-zag", c);
                tree.rotate_up(c).expect(basic_tree::NO_PARENT_ERROR);
                tree.rotate_up(c).expect(basic_tree::NO_PARENT_ERROR);
                self.rotations += 2;
            }
        }
    }

    /// Splays the current position to the root of the tree.
    pub fn splay(&mut self) {
        if self.walker.is_empty() && self.walker.go_up().is_err() {
            return; // the tree is empty
        }
        while !self.walker.is_root() {
            self.splay_step();
        }
    }
}

impl<'a, K: Ord> SplayWalker<'a, K> {
    /// Moves to the node holding `key`, or to the empty position where it would be.
    /// Nothing is splayed until the walker is dropped.
    pub fn seek(&mut self, key: &K) -> Option<NodeId> {
        self.walker.seek(key)
    }
}

impl<'a, K> Drop for SplayWalker<'a, K> {
    fn drop(&mut self) {
        self.splay();
        if self.rotations > 0 {
            log::trace!("splayed to the root in {} rotations", self.rotations);
        }
    }
}

impl<'a, K> std::ops::Deref for SplayWalker<'a, K> {
    type Target = BasicWalker<'a, K>;
    fn deref(&self) -> &BasicWalker<'a, K> {
        &self.walker
    }
}
