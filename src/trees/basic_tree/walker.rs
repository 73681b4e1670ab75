// This is a private module, so no documentation for it directly.
// instead look for documentation of the `BasicWalker` struct.

use super::*;

/// Where a [`BasicWalker`] currently is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Position {
    /// At an existing node.
    Node(NodeId),
    /// At an empty slot: the son on the given side of the given node,
    /// or the root slot of an empty tree if [`None`].
    Vacant(Option<(NodeId, Side)>),
}

/// This struct implements a walker for the [`BasicTree`] type.
/// It holds a mutable reference to the tree, and allows you to walk up and down on it.
/// The walker may also be in a position which is the son of a node, but doesn't contain
/// a node by itself, and then it is said to be in an empty position.
///
/// Walkers for other kinds of trees may be built by wrapping around the [`BasicWalker`] type,
/// as tree types can be built by wrapping around the [`BasicTree`] type.
pub struct BasicWalker<'a, K> {
    tree: &'a mut BasicTree<K>,
    pos: Position,
}

impl<'a, K> BasicWalker<'a, K> {
    pub fn new(tree: &'a mut BasicTree<K>) -> BasicWalker<'a, K> {
        let pos = match tree.root() {
            Some(root) => Position::Node(root),
            None => Position::Vacant(None),
        };
        BasicWalker { tree, pos }
    }

    /// A walker at the given position. The position must belong to `tree`.
    pub(crate) fn at(tree: &'a mut BasicTree<K>, pos: Position) -> BasicWalker<'a, K> {
        BasicWalker { tree, pos }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Returns true if at an empty position.
    pub fn is_empty(&self) -> bool {
        matches!(self.pos, Position::Vacant(_))
    }

    /// Returns true if at the root position.
    /// Note: even if you are at the root, the root might still be empty.
    pub fn is_root(&self) -> bool {
        match self.pos {
            Position::Node(id) => self.tree.parent_of(id).is_none(),
            Position::Vacant(slot) => slot.is_none(),
        }
    }

    /// If the current position is the left son of a node, returns [`Some(Left)`].
    /// If the current position is the right son of a node, returns [`Some(Right)`].
    /// If at the root, returns [`None`].
    pub fn is_left_son(&self) -> Option<Side> {
        match self.pos {
            Position::Node(id) => self.tree.side_of(id),
            Position::Vacant(slot) => slot.map(|(_, side)| side),
        }
    }

    pub fn node_id(&self) -> Option<NodeId> {
        match self.pos {
            Position::Node(id) => Some(id),
            Position::Vacant(_) => None,
        }
    }

    pub fn value(&self) -> Option<&K> {
        Some(self.tree.node_ref(self.node_id()?).value())
    }

    pub fn inner(&self) -> &BasicTree<K> {
        &*self.tree
    }

    pub(crate) fn inner_mut(&mut self) -> &mut BasicTree<K> {
        &mut *self.tree
    }

    pub fn go_left(&mut self) -> Result<(), ()> {
        self.go_to_son(Side::Left)
    }

    pub fn go_right(&mut self) -> Result<(), ()> {
        self.go_to_son(Side::Right)
    }

    fn go_to_son(&mut self, side: Side) -> Result<(), ()> {
        let id = self.node_id().ok_or(())?;
        self.pos = match self.tree.child_of(id, side) {
            Some(son) => Position::Node(son),
            None => Position::Vacant(Some((id, side))),
        };
        Ok(())
    }

    /// Goes up to the parent, and returns which son the walker came from.
    /// Returns `Err(())` at the root.
    pub fn go_up(&mut self) -> Result<Side, ()> {
        match self.pos {
            Position::Node(id) => {
                let side = self.tree.side_of(id).ok_or(())?;
                let parent = self.tree.parent_of(id).ok_or(())?;
                self.pos = Position::Node(parent);
                Ok(side)
            }
            Position::Vacant(Some((parent, side))) => {
                self.pos = Position::Node(parent);
                Ok(side)
            }
            Position::Vacant(None) => Err(()),
        }
    }

    pub fn go_to_root(&mut self) {
        while self.go_up().is_ok() {}
    }

    /// Rotates the current node over its parent.
    /// The walker stays on the same node, which is now one level higher.
    /// Returns the side the node used to be on, or `Err(())` if at the root
    /// or at an empty position.
    pub fn rot_up(&mut self) -> Result<Side, ()> {
        let id = self.node_id().ok_or(())?;
        let side = self.tree.rotate_up(id).ok_or(())?;
        self.tree.update_height_above(id);
        Ok(side)
    }

    /// Deletes the value at the current node and returns it.
    /// If the current position is empty, returns [`None`].
    ///
    /// Afterwards, the walker is at whatever took the deleted value's place:
    /// the same node if it had two sons (it now holds the successor's value),
    /// otherwise its only son, or the empty slot it left behind.
    pub fn delete(&mut self) -> Option<K> {
        let id = self.node_id()?;
        let node = self.tree.node_ref(id);
        let (left, right) = (node.left(), node.right());
        if left.is_some() && right.is_some() {
            return Some(self.tree.remove_node(id));
        }
        let son = left.or(right);
        let slot = self
            .tree
            .side_of(id)
            .and_then(|side| Some((self.tree.parent_of(id)?, side)));
        let value = self.tree.remove_node(id);
        self.pos = match son {
            Some(son) => Position::Node(son),
            None => Position::Vacant(slot),
        };
        Some(value)
    }
}

impl<'a, K: Ord> BasicWalker<'a, K> {
    /// Searches for `key` from the root, and moves to the node holding it,
    /// or to the empty slot where it would be inserted.
    pub fn seek(&mut self, key: &K) -> Option<NodeId> {
        let result = self.tree.locate(key);
        self.pos = result.position();
        result.found
    }

    /// Inserts the value into the tree at the current empty position.
    /// If the current position is not empty, or `value` doesn't belong in this
    /// slot according to the order of the tree, returns [`None`].
    /// Afterwards, the walker is at the new node.
    pub fn insert(&mut self, value: K) -> Option<NodeId> {
        let slot = match self.pos {
            Position::Node(_) => return None,
            Position::Vacant(slot) => slot,
        };
        if let Some((parent, side)) = slot {
            if !self.fits_under(parent, side, &value) {
                return None;
            }
        }
        let id = self.tree.attach(slot, value);
        self.pos = Position::Node(id);
        Some(id)
    }

    // the slot sits between `parent` and its in-order neighbour on `side`
    fn fits_under(&self, parent: NodeId, side: Side, value: &K) -> bool {
        let neighbour = self.tree.neighbour(parent, side);
        let (low, high) = match side {
            Side::Left => (neighbour, Some(parent)),
            Side::Right => (Some(parent), neighbour),
        };
        let above_low = low.map_or(true, |id| self.tree.node_ref(id).value() < value);
        let below_high = high.map_or(true, |id| value < self.tree.node_ref(id).value());
        above_low && below_high
    }
}
