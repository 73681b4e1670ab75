//! This module implements the tree traits for the [`BasicTree`], and its invariant checks.
//! It is mostly a separate file from the main module file, since it's a private module, and its
//! contents are re-exported.

use super::*;
use crate::error::InvariantError;
use crate::trees::SomeTree;

impl<K: Ord> SomeTree<K> for BasicTree<K> {
    fn search(&mut self, key: &K) -> Option<NodeId> {
        BasicTree::search(self, key)
    }

    fn insert(&mut self, value: K) -> NodeId {
        BasicTree::insert(self, value)
    }

    fn delete(&mut self, key: &K) -> Option<K> {
        BasicTree::delete(self, key)
    }

    fn inner(&self) -> &BasicTree<K> {
        self
    }
}

impl<K: Ord> BasicTree<K> {
    /// Checks that invariants remain correct: the order of the values,
    /// the parent links, the cached heights and the recorded size.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let root = match self.root {
            None if self.size == 0 => return Ok(()),
            None => {
                return Err(InvariantError::SizeMismatch {
                    recorded: self.size,
                    reachable: 0,
                })
            }
            Some(root) => root,
        };
        if self.checked_node(root)?.parent.is_some() {
            return Err(InvariantError::RootHasParent { root });
        }

        // iterative in-order traversal, checking every node on the way down
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![];
        let mut reachable = 0;
        let mut previous: Option<&K> = None;
        let mut current = Some(root);
        loop {
            while let Some(id) = current {
                let node = self.checked_node(id)?;
                if visited[id.0] {
                    return Err(InvariantError::Cycle { node: id });
                }
                visited[id.0] = true;
                self.validate_locally(id, node)?;
                stack.push(id);
                current = node.left;
            }

            let id = match stack.pop() {
                None => break,
                Some(id) => id,
            };
            let node = self.node_ref(id);
            reachable += 1;
            if let Some(previous) = previous {
                if previous >= &node.value {
                    return Err(InvariantError::OrderViolation { node: id });
                }
            }
            previous = Some(&node.value);
            current = node.right;
        }

        if reachable != self.size {
            return Err(InvariantError::SizeMismatch {
                recorded: self.size,
                reachable,
            });
        }
        Ok(())
    }

    fn validate_locally(&self, id: NodeId, node: &BasicNode<K>) -> Result<(), InvariantError> {
        for &child in [node.left, node.right].iter().flatten() {
            let found = self.checked_node(child)?.parent;
            if found != Some(id) {
                return Err(InvariantError::BrokenParentLink {
                    node: id,
                    child,
                    found,
                });
            }
        }
        let expected = 1 + std::cmp::max(self.height(node.left), self.height(node.right));
        if node.height != expected {
            return Err(InvariantError::HeightMismatch {
                node: id,
                stored: node.height,
                expected,
            });
        }
        Ok(())
    }

    fn checked_node(&self, id: NodeId) -> Result<&BasicNode<K>, InvariantError> {
        self.node(id).ok_or(InvariantError::Dangling { node: id })
    }
}

impl<K: Clone> Clone for BasicTree<K> {
    fn clone(&self) -> Self {
        BasicTree {
            nodes: self.nodes.clone(),
            free: self.free.clone(),
            root: self.root,
            size: self.size,
        }
    }
}

impl<K: Ord> std::iter::FromIterator<K> for BasicTree<K> {
    /// Inserts the values one by one, so the shape of the tree
    /// depends on the order of the iterator.
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut tree = BasicTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for BasicTree<K> {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<K> IntoIterator for BasicTree<K> {
    type Item = K;
    type IntoIter = iterators::IntoIter<K>;
    fn into_iter(self) -> Self::IntoIter {
        iterators::IntoIter::new(self)
    }
}

impl<'a, K> IntoIterator for &'a BasicTree<K> {
    type Item = &'a K;
    type IntoIter = iterators::Iter<'a, K>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for BasicTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_a_stale_height() {
        let mut tree: BasicTree<i32> = vec![2, 1, 3].into_iter().collect();
        let root = tree.root().unwrap();
        tree.node_mut(root).height = 5;
        assert_eq!(
            tree.validate(),
            Err(InvariantError::HeightMismatch {
                node: root,
                stored: 5,
                expected: 1,
            })
        );
    }

    #[test]
    fn detects_a_broken_parent_link() {
        let mut tree: BasicTree<i32> = vec![2, 1, 3].into_iter().collect();
        let root = tree.root().unwrap();
        let left = tree.search(&1).unwrap();
        tree.node_mut(left).parent = None;
        assert_eq!(
            tree.validate(),
            Err(InvariantError::BrokenParentLink {
                node: root,
                child: left,
                found: None,
            })
        );
    }

    #[test]
    fn detects_an_order_violation() {
        let mut tree: BasicTree<i32> = vec![2, 1, 3].into_iter().collect();
        let left = tree.search(&1).unwrap();
        tree.node_mut(left).value = 4;
        assert_eq!(
            tree.validate(),
            Err(InvariantError::OrderViolation {
                node: tree.root().unwrap()
            })
        );
    }

    #[test]
    fn detects_a_wrong_size() {
        let mut tree: BasicTree<i32> = vec![2, 1, 3].into_iter().collect();
        tree.size = 4;
        assert_eq!(
            tree.validate(),
            Err(InvariantError::SizeMismatch {
                recorded: 4,
                reachable: 3,
            })
        );
    }

    #[test]
    fn clone_is_independent() {
        let mut tree: BasicTree<i32> = vec![5, 2, 8, 1, 9].into_iter().collect();
        let copy = tree.clone();
        tree.delete(&5);
        tree.insert(4);
        assert_eq!(copy.iter().cloned().collect::<Vec<_>>(), vec![1, 2, 5, 8, 9]);
        assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), vec![1, 2, 4, 8, 9]);
        copy.assert_correctness();
        tree.assert_correctness();
    }

    #[test]
    fn debug_lists_values_in_order() {
        let tree: BasicTree<i32> = vec![2, 1, 3].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "{1, 2, 3}");
    }
}
