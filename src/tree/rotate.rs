use super::Tree;
use crate::node::{NodeId, Side};

impl<K, M> Tree<K, M> {
    /// Rotates `node` down toward `side`, promoting its child on the opposite side into its
    /// place, and returns the promoted node.
    ///
    /// The parent slot (or the root), every parent back-reference and, when tracked, both
    /// subtree sizes are updated. Metadata is left alone.
    ///
    /// # Panics
    ///
    /// Panics if `node` has no child opposite `side`.
    pub fn rotate(&mut self, node: NodeId, side: Side) -> NodeId {
        let up_side = side.opposite();
        let pivot = self.child(node, up_side);
        assert!(!pivot.is_nil(), "Expected a child to promote.");

        let inner = self.child(pivot, side);
        let parent = self[node].parent;
        let node_side = self.side_of(node);

        *self[node].child_mut(up_side) = inner;
        if !inner.is_nil() {
            self[inner].parent = node;
        }

        self[pivot].parent = parent;
        match node_side {
            Some(node_side) => *self[parent].child_mut(node_side) = pivot,
            None => self.root = pivot,
        }

        *self[pivot].child_mut(side) = node;
        self[node].parent = pivot;

        if self.track_size {
            let size = self.size(self[node].left) + self.size(self[node].right) + 1;
            self[pivot].size = self[node].size;
            self[node].size = size;
        }

        match side {
            Side::Left => self.stats.left_rotations += 1,
            Side::Right => self.stats.right_rotations += 1,
        }
        trace!("rotated {:?} toward {:?}, promoting {:?}", node, side, pivot);
        pivot
    }

    pub fn rotate_left(&mut self, node: NodeId) -> NodeId {
        self.rotate(node, Side::Left)
    }

    pub fn rotate_right(&mut self, node: NodeId) -> NodeId {
        self.rotate(node, Side::Right)
    }
}
