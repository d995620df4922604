//! Node storage shared by every balancing schedule.

use std::fmt;

/// A stable handle to a node stored in a `NodePool`.
///
/// Rotations relink handles but never move nodes, so a `NodeId` stays valid until the node it
/// names is released. `NodeId::NIL` is the reserved sentinel for an absent child, parent or root.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

impl NodeId {
    /// The sentinel handle that never names a node.
    pub const NIL: NodeId = NodeId(usize::max_value());

    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }

    /// Returns `true` if this is the sentinel handle.
    pub fn is_nil(self) -> bool {
        self == NodeId::NIL
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_nil() {
            write!(f, "NodeId(NIL)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// One of the two child slots of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A struct representing a node of a balanced binary search tree.
///
/// `M` is the balance metadata of the schedule that owns the node: a signed balance factor for
/// AVL trees, a color for red-black trees.
pub struct Node<K, M> {
    pub key: K,
    pub meta: M,
    pub left: NodeId,
    pub right: NodeId,
    pub parent: NodeId,
    pub size: usize,
}

impl<K, M> Node<K, M> {
    pub fn new(key: K, meta: M) -> Self {
        Node {
            key,
            meta,
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent: NodeId::NIL,
            size: 1,
        }
    }

    pub fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut NodeId {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_nil() && self.right.is_nil()
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeId, Side};

    #[test]
    fn test_nil() {
        assert!(NodeId::NIL.is_nil());
        assert!(!NodeId::new(0).is_nil());
        assert_eq!(format!("{:?}", NodeId::NIL), "NodeId(NIL)");
        assert_eq!(format!("{:?}", NodeId::new(3)), "NodeId(3)");
    }

    #[test]
    fn test_new_node_is_detached() {
        let node = Node::new(5, 0i8);
        assert!(node.is_leaf());
        assert!(node.parent.is_nil());
        assert_eq!(node.size, 1);
    }

    #[test]
    fn test_child_mut() {
        let mut node = Node::new(5, ());
        *node.child_mut(Side::Right) = NodeId::new(7);
        assert_eq!(node.child(Side::Right), NodeId::new(7));
        assert_eq!(node.child(Side::Right.opposite()), NodeId::NIL);
    }
}
