//! In-order iterators for [`BasicTree`].

use super::*;

/// Iterates over the values of a [`BasicTree`] in increasing order.
/// Walks along the parent links, so it needs no stack.
pub struct Iter<'a, K> {
    tree: &'a BasicTree<K>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(super) fn new(tree: &'a BasicTree<K>) -> Self {
        Iter {
            tree,
            next: tree.root().map(|root| tree.extreme(root, Side::Left)),
            remaining: tree.size(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let id = self.next?;
        let tree: &'a BasicTree<K> = self.tree;
        self.next = tree.neighbour(id, Side::Right);
        self.remaining -= 1;
        Some(tree.node_ref(id).value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> ExactSizeIterator for Iter<'a, K> {}
impl<'a, K> std::iter::FusedIterator for Iter<'a, K> {}

/// Owning iterator over the values of a [`BasicTree`], in increasing order.
pub struct IntoIter<K> {
    tree: BasicTree<K>,
}

impl<K> IntoIter<K> {
    pub(crate) fn new(tree: BasicTree<K>) -> Self {
        IntoIter { tree }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let first = self.tree.extreme(self.tree.root()?, Side::Left);
        // the minimum has no left son, so removing it never moves values around
        Some(self.tree.remove_node(first))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.size(), Some(self.tree.size()))
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}
impl<K> std::iter::FusedIterator for IntoIter<K> {}
