use super::Tree;
use crate::node::{NodeId, Side};

/// An iterator over the keys of a tree in ascending order.
///
/// The iterator walks parent links and needs no stack. A clone continues from the same position.
pub struct Iter<'a, K, M> {
    tree: &'a Tree<K, M>,
    next: NodeId,
    remaining: usize,
}

impl<'a, K, M> Iter<'a, K, M> {
    pub(super) fn new(tree: &'a Tree<K, M>) -> Self {
        let next = if tree.root().is_nil() {
            NodeId::NIL
        } else {
            tree.extreme(tree.root(), Side::Left)
        };
        Iter {
            tree,
            next,
            remaining: tree.len(),
        }
    }

    fn successor(&self, id: NodeId) -> NodeId {
        let right = self.tree.right(id);
        if !right.is_nil() {
            return self.tree.extreme(right, Side::Left);
        }
        let mut curr = id;
        while self.tree.side_of(curr) == Some(Side::Right) {
            curr = self.tree.parent(curr);
        }
        self.tree.parent(curr)
    }
}

impl<'a, K, M> Clone for Iter<'a, K, M> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, M> Iterator for Iter<'a, K, M> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_nil() {
            return None;
        }
        let curr = self.next;
        self.next = self.successor(curr);
        self.remaining -= 1;
        Some(&self.tree[curr].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, M> ExactSizeIterator for Iter<'a, K, M> {}
