//! The basic tree module.
//! This module implements basic unbalanced binary search trees.
//!
//! All the nodes of a [`BasicTree`] live in a single arena owned by the tree,
//! and refer to each other by [`NodeId`]. The parent links are plain indices,
//! so they never take part in ownership.

// these should not be public as they are merely separate files
// for some of the functions of this module
mod implementations;
mod walker;

pub mod iterators;

pub use walker::*;

use super::{NodeId, Side};
use std::cmp::Ordering;

pub(crate) const NO_NODE_ERROR: &str = "invariant violated: node id refers to an empty slot";
pub(crate) const NO_PARENT_ERROR: &str = "invariant violated: expected a parent during rotation";

/// A node of a [`BasicTree`]. Only readable from outside the tree.
#[derive(Clone, Debug)]
pub struct BasicNode<K> {
    value: K,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
    /// Height of the subtree rooted here. A leaf has height `0`.
    height: i32,
}

impl<K> BasicNode<K> {
    fn new(value: K) -> BasicNode<K> {
        BasicNode {
            value,
            left: None,
            right: None,
            parent: None,
            height: 0,
        }
    }

    pub fn value(&self) -> &K {
        &self.value
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The cached height of this node's subtree.
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The outcome of [`BasicTree::locate`].
///
/// `hot` is the last node the search stepped down from. After an unsuccessful
/// search, it is the node under which the key would be inserted, at `side`.
/// After a successful search, it is the parent of the found node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchResult {
    pub found: Option<NodeId>,
    pub hot: Option<NodeId>,
    pub side: Side,
}

impl SearchResult {
    /// The empty slot that the search ended in. [`None`] if the tree is empty
    /// or the search was successful.
    pub fn slot(&self) -> Option<(NodeId, Side)> {
        if self.found.is_some() {
            return None;
        }
        self.hot.map(|hot| (hot, self.side))
    }

    /// The position a walker should be at after this search.
    pub fn position(&self) -> Position {
        match self.found {
            Some(id) => Position::Node(id),
            None => Position::Vacant(self.hot.map(|hot| (hot, self.side))),
        }
    }
}

/// An unbalanced binary search tree. Might be empty.
///
/// Every value is stored at most once: inserting a value that is already
/// present returns the existing node.
pub struct BasicTree<K> {
    nodes: Vec<Option<BasicNode<K>>>,
    /// Indices of empty slots in `nodes`, reused by later insertions.
    free: Vec<usize>,
    root: Option<NodeId>,
    size: usize,
}

impl<K> BasicTree<K> {
    pub fn new() -> Self {
        BasicTree {
            nodes: vec![],
            free: vec![],
            root: None,
            size: 0,
        }
    }

    /// The number of values in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_value(&self) -> Option<&K> {
        Some(self.node_ref(self.root?).value())
    }

    /// Returns the node with the given id, if it is still in the tree.
    pub fn node(&self, id: NodeId) -> Option<&BasicNode<K>> {
        self.nodes.get(id.0)?.as_ref()
    }

    /// Returns the value stored at the given node, if it is still in the tree.
    pub fn get(&self, id: NodeId) -> Option<&K> {
        Some(self.node(id)?.value())
    }

    /// The cached height of a node. `-1` for an absent node.
    pub fn height(&self, node: Option<NodeId>) -> i32 {
        node.and_then(|id| self.node(id)).map_or(-1, |node| node.height)
    }

    /// The height of the whole tree. `-1` for the empty tree.
    pub fn tree_height(&self) -> i32 {
        self.height(self.root)
    }

    /// The smallest value in the tree.
    pub fn first(&self) -> Option<&K> {
        let id = self.extreme(self.root?, Side::Left);
        Some(self.node_ref(id).value())
    }

    /// The largest value in the tree.
    pub fn last(&self) -> Option<&K> {
        let id = self.extreme(self.root?, Side::Right);
        Some(self.node_ref(id).value())
    }

    /// Removes all the values.
    pub fn clear(&mut self) {
        *self = BasicTree::new();
    }

    /// Returns a walker positioned at the root.
    pub fn walker(&mut self) -> BasicWalker<'_, K> {
        BasicWalker::new(self)
    }

    /// Iterates over the values in increasing order.
    pub fn iter(&self) -> iterators::Iter<'_, K> {
        iterators::Iter::new(self)
    }

    /// Recomputes the height of `node`, and then of its ancestors.
    /// Climbing stops at the first ancestor whose height didn't change,
    /// since nothing above it can change either.
    /// Does nothing if `node` is no longer in the tree.
    pub fn update_height_above(&mut self, node: NodeId) {
        if self.node(node).is_none() {
            return;
        }
        self.recompute_height(node);
        let mut current = self.parent_of(node);
        while let Some(id) = current {
            if !self.recompute_height(id) {
                break;
            }
            current = self.parent_of(id);
        }
    }

    /// Right rotation: promotes `node`, which must be a left son, over its parent.
    /// The parent becomes `node`'s right son, and `node`'s old right subtree
    /// becomes the parent's left subtree.
    ///
    /// Returns [`None`] and does nothing if `node` has no parent, is a right son,
    /// or is no longer in the tree.
    pub fn zig(&mut self, node: NodeId) -> Option<()> {
        self.rotate_side(node, Side::Left)
    }

    /// Left rotation: promotes `node`, which must be a right son, over its parent.
    /// The mirror image of [`BasicTree::zig`].
    ///
    /// Returns [`None`] and does nothing if `node` has no parent, is a left son,
    /// or is no longer in the tree.
    pub fn zag(&mut self, node: NodeId) -> Option<()> {
        self.rotate_side(node, Side::Right)
    }

    fn rotate_side(&mut self, node: NodeId, side: Side) -> Option<()> {
        self.node(node)?;
        if self.side_of(node)? != side {
            return None;
        }
        self.rotate_up(node)?;
        self.update_height_above(node);
        Some(())
    }

    /// Promotes `c` over its parent, keeping the in-order sequence intact.
    /// Only the heights of the two rotated nodes are refreshed: the ancestors
    /// are left for the caller.
    /// Returns the side `c` used to be on, or [`None`] if `c` is the root.
    pub(crate) fn rotate_up(&mut self, c: NodeId) -> Option<Side> {
        let side = self.side_of(c)?;
        let p = self.parent_of(c)?;
        let g = self.parent_of(p);
        let inner = self.node_ref(c).child(!side);

        self.replace_child(g, p, Some(c));
        self.link(p, side, inner);
        self.link(c, !side, Some(p));

        self.recompute_height(p);
        self.recompute_height(c);
        log::trace!("rotated {:?} over {:?}", c, p);
        Some(side)
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> &BasicNode<K> {
        self.node(id).expect(NO_NODE_ERROR)
    }

    fn node_mut(&mut self, id: NodeId) -> &mut BasicNode<K> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .expect(NO_NODE_ERROR)
    }

    pub(crate) fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_ref(id).parent
    }

    pub(crate) fn child_of(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node_ref(id).child(side)
    }

    /// Which son of its parent `id` is. [`None`] for the root.
    pub(crate) fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.parent_of(id)?;
        if self.node_ref(parent).left == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// The furthest node on the given side of `id`'s subtree.
    pub(crate) fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(next) = self.child_of(id, side) {
            id = next;
        }
        id
    }

    /// The next node in in-order sequence in the given direction.
    /// `neighbour(id, Side::Right)` is the direct successor of `id`.
    pub(crate) fn neighbour(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(son) = self.child_of(id, side) {
            return Some(self.extreme(son, !side));
        }
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            if self.side_of(current) == Some(!side) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Allocates a detached node. The node is counted in the size immediately,
    /// so it must be linked into the tree before the operation finishes.
    pub(crate) fn alloc(&mut self, value: K) -> NodeId {
        let node = Some(BasicNode::new(value));
        self.size += 1;
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                NodeId(index)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> K {
        let node = self.nodes[id.0].take().expect(NO_NODE_ERROR);
        self.free.push(id.0);
        self.size -= 1;
        if self.size == 0 {
            debug_assert!(self.root.is_none());
            // nothing is left, so the arena can be dropped as well
            self.nodes.clear();
            self.free.clear();
        }
        node.value
    }

    /// Makes `child` the `side` son of `parent`, fixing the parent link of `child`.
    pub(crate) fn link(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        *self.node_mut(parent).child_mut(side) = child;
        if let Some(child) = child {
            self.node_mut(child).parent = Some(parent);
        }
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
        if let Some(root) = root {
            self.node_mut(root).parent = None;
        }
    }

    /// Puts `new` in the slot that `old` occupies under `parent`,
    /// or at the root if `parent` is [`None`].
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            None => self.set_root(new),
            Some(parent) => {
                let side = if self.node_ref(parent).left == Some(old) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.link(parent, side, new);
            }
        }
    }

    /// Recomputes the height of `id` from its sons.
    /// Returns `true` if the height changed.
    pub(crate) fn recompute_height(&mut self, id: NodeId) -> bool {
        let node = self.node_ref(id);
        let new_height = 1 + std::cmp::max(self.height(node.left), self.height(node.right));
        let node = self.node_mut(id);
        let changed = node.height != new_height;
        node.height = new_height;
        changed
    }

    fn swap_values(&mut self, a: NodeId, b: NodeId) {
        assert_ne!(a, b);
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.nodes.split_at_mut(high);
        let first = head[low].as_mut().expect(NO_NODE_ERROR);
        let second = tail[0].as_mut().expect(NO_NODE_ERROR);
        std::mem::swap(&mut first.value, &mut second.value);
    }

    /// Links a new leaf holding `value` into the given empty slot,
    /// or makes it the root if `slot` is [`None`].
    pub(crate) fn attach(&mut self, slot: Option<(NodeId, Side)>, value: K) -> NodeId {
        let id = self.alloc(value);
        match slot {
            Some((parent, side)) => {
                debug_assert!(self.child_of(parent, side).is_none());
                self.link(parent, side, Some(id));
            }
            None => {
                debug_assert!(self.root.is_none());
                self.set_root(Some(id));
            }
        }
        self.update_height_above(id);
        log::debug!("inserted node {:?}", id);
        id
    }

    /// Removes the value stored at `id` from the tree and returns it.
    ///
    /// A node with at most one son is replaced by that son. A node with two sons
    /// takes the value of its direct successor, and the successor's node is
    /// removed instead. Either way, the node that physically leaves the tree
    /// has at most one son.
    pub(crate) fn remove_node(&mut self, id: NodeId) -> K {
        let node = self.node_ref(id);
        let victim = match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.extreme(right, Side::Left);
                self.swap_values(id, successor);
                successor
            }
            _ => id,
        };

        let node = self.node_ref(victim);
        let parent = node.parent;
        let son = node.left.or(node.right);
        self.replace_child(parent, victim, son);
        let value = self.release(victim);
        if let Some(parent) = parent {
            self.update_height_above(parent);
        }
        log::debug!("removed node {:?}", victim);
        value
    }
}

impl<K: Ord> BasicTree<K> {
    /// Walks down from the root looking for `key`.
    /// See [`SearchResult`] for the meaning of the result.
    pub fn locate(&self, key: &K) -> SearchResult {
        let mut result = SearchResult {
            found: None,
            hot: None,
            side: Side::Left,
        };
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node_ref(id);
            let side = match key.cmp(&node.value) {
                Ordering::Equal => {
                    result.found = Some(id);
                    return result;
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            result.hot = Some(id);
            result.side = side;
            current = node.child(side);
        }
        result
    }

    /// Returns the node holding `key`, if any.
    pub fn search(&self, key: &K) -> Option<NodeId> {
        self.locate(key).found
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Inserts `value` as a new leaf, unless an equal value is already present,
    /// in which case `value` is dropped. Returns the node holding the value.
    pub fn insert(&mut self, value: K) -> NodeId {
        let result = self.locate(&value);
        match result.found {
            Some(id) => id,
            None => self.attach(result.slot(), value),
        }
    }

    /// Removes the value equal to `key`, and returns it.
    /// Does nothing if it isn't present.
    pub fn delete(&mut self, key: &K) -> Option<K> {
        let id = self.search(key)?;
        Some(self.remove_node(id))
    }
}

impl<K> Default for BasicTree<K> {
    fn default() -> Self {
        BasicTree::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SomeTree;

    fn values(tree: &BasicTree<i32>) -> Vec<i32> {
        tree.iter().cloned().collect()
    }

    #[test]
    fn single_insert_is_a_leaf() {
        let mut tree = BasicTree::new();
        tree.insert(50);
        let id = tree.search(&50).unwrap();
        assert_eq!(tree.node(id).unwrap().height(), 0);
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.root(), Some(id));
        tree.assert_correctness();
    }

    #[test]
    fn locate_reports_the_insertion_point() {
        let tree: BasicTree<i32> = vec![50, 30, 70, 60].into_iter().collect();
        let res = tree.locate(&65);
        assert_eq!(res.found, None);
        let hot = res.hot.unwrap();
        assert_eq!(tree.get(hot), Some(&60));
        assert_eq!(res.side, Side::Right);
        assert_eq!(res.slot(), Some((hot, Side::Right)));

        let res = tree.locate(&30);
        assert_eq!(tree.get(res.found.unwrap()), Some(&30));
        assert_eq!(tree.get(res.hot.unwrap()), Some(&50));
        assert_eq!(res.slot(), None);

        let empty = BasicTree::<i32>::new();
        let res = empty.locate(&1);
        assert_eq!((res.found, res.hot), (None, None));
        assert_eq!(res.position(), Position::Vacant(None));
    }

    #[test]
    fn duplicate_insert_returns_existing_node() {
        let mut tree = BasicTree::new();
        let a = tree.insert(7);
        let b = tree.insert(7);
        assert_eq!(a, b);
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn heights_follow_insertions() {
        let mut tree = BasicTree::new();
        for x in 1..=5 {
            tree.insert(x);
        }
        // sorted insertions build a path
        assert_eq!(tree.tree_height(), 4);
        tree.insert(0);
        assert_eq!(tree.tree_height(), 4);
        assert_eq!(tree.height(None), -1);
        tree.assert_correctness();
    }

    #[test]
    fn delete_leaf_and_single_son() {
        let mut tree: BasicTree<i32> = vec![50, 30, 70, 20].into_iter().collect();
        assert_eq!(tree.delete(&20), Some(20));
        tree.assert_correctness();
        tree.insert(20);
        // 30 has a single son
        assert_eq!(tree.delete(&30), Some(30));
        tree.assert_correctness();
        assert_eq!(values(&tree), vec![20, 50, 70]);
        assert_eq!(tree.delete(&30), None);
        assert_eq!(tree.size(), 3);
    }

    #[test]
    fn delete_with_two_sons_keeps_the_node() {
        let mut tree: BasicTree<i32> = vec![50, 30, 70, 60, 80, 65].into_iter().collect();
        let root = tree.root().unwrap();
        assert_eq!(tree.delete(&50), Some(50));
        // the successor's value moved into the old root node
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.get(root), Some(&60));
        assert_eq!(values(&tree), vec![30, 60, 65, 70, 80]);
        tree.assert_correctness();
    }

    #[test]
    fn deleting_everything_empties_the_tree() {
        let mut tree: BasicTree<i32> = (0..10).collect();
        for x in (0..10).rev() {
            assert_eq!(tree.delete(&x), Some(x));
            tree.assert_correctness();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.tree_height(), -1);
        // slots are handed out again after the tree emptied
        let id = tree.insert(3);
        assert_eq!(id.index(), 0);
    }

    #[test]
    fn zig_and_zag_rotate_around_the_parent() {
        let mut tree: BasicTree<i32> = vec![50, 30, 70, 20, 40].into_iter().collect();
        let thirty = tree.search(&30).unwrap();
        let fifty = tree.search(&50).unwrap();
        let forty = tree.search(&40).unwrap();

        // 30 is a left son, so zag must refuse
        assert_eq!(tree.zag(thirty), None);
        assert_eq!(tree.zig(thirty), Some(()));
        assert_eq!(tree.root(), Some(thirty));
        let node = tree.node(fifty).unwrap();
        assert_eq!(node.parent(), Some(thirty));
        assert_eq!(node.left(), Some(forty));
        assert_eq!(tree.node(forty).unwrap().parent(), Some(fifty));
        assert_eq!(tree.tree_height(), 2);
        tree.assert_correctness();

        // and back
        assert_eq!(tree.zag(fifty), Some(()));
        assert_eq!(tree.root(), Some(fifty));
        assert_eq!(values(&tree), vec![20, 30, 40, 50, 70]);
        tree.assert_correctness();

        // the root has no parent to rotate over
        assert_eq!(tree.zig(fifty), None);
    }

    #[test]
    fn rotation_below_the_root_fixes_the_grandparent() {
        let mut tree: BasicTree<i32> = vec![50, 30, 20, 10].into_iter().collect();
        let twenty = tree.search(&20).unwrap();
        let fifty = tree.search(&50).unwrap();
        assert_eq!(tree.zig(twenty), Some(()));
        assert_eq!(tree.node(fifty).unwrap().left(), Some(twenty));
        assert_eq!(tree.node(twenty).unwrap().parent(), Some(fifty));
        assert_eq!(tree.tree_height(), 2);
        tree.assert_correctness();
    }

    #[test]
    fn rotations_ignore_removed_nodes() {
        let mut tree: BasicTree<i32> = vec![50, 30, 70].into_iter().collect();
        let seventy = tree.search(&70).unwrap();
        let thirty = tree.search(&30).unwrap();
        assert_eq!(tree.delete(&70), Some(70));
        assert_eq!(tree.zag(seventy), None);
        assert_eq!(tree.zig(seventy), None);
        tree.update_height_above(seventy);
        assert_eq!(tree.height(Some(seventy)), -1);
        assert_eq!(values(&tree), vec![30, 50]);
        assert_eq!(tree.tree_height(), 1);
        tree.assert_correctness();

        // the tree is still usable afterwards
        assert_eq!(tree.zig(thirty), Some(()));
        assert_eq!(tree.root(), Some(thirty));
        tree.assert_correctness();
    }

    #[test]
    fn clear_then_reuse() {
        let mut tree: BasicTree<i32> = (0..20).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.tree_height(), -1);
        assert_eq!(tree.search(&5), None);
        tree.assert_correctness();

        tree.insert(7);
        tree.insert(3);
        assert_eq!(tree.size(), 2);
        assert_eq!(values(&tree), vec![3, 7]);
        tree.assert_correctness();
    }

    #[test]
    fn first_and_last() {
        let tree: BasicTree<i32> = vec![5, 3, 9, 1, 7].into_iter().collect();
        assert_eq!(tree.first(), Some(&1));
        assert_eq!(tree.last(), Some(&9));
        assert_eq!(BasicTree::<i32>::new().first(), None);
    }
}
