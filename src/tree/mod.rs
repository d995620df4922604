//! The node engine shared by every balancing schedule.
//!
//! `Tree<K, M>` owns the root slot, the live count, the node pool and the benchmark counters. It
//! knows how to search, attach a leaf, splice out a node with at most one child and rotate, but
//! it never decides when to do so: that is the job of a `Balancer`.

mod iter;
mod rotate;

pub use self::iter::Iter;

use crate::config::Pooling;
use crate::node::{Node, NodeId, Side};
use crate::pool::NodePool;
use crate::stats::Stats;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;
use std::ops::{Index, IndexMut};

pub struct Tree<K, M> {
    pool: NodePool<K, M>,
    root: NodeId,
    len: usize,
    track_size: bool,
    stats: Stats,
}

impl<K, M> Tree<K, M> {
    pub fn new(pooling: Pooling, track_size: bool) -> Self {
        Tree {
            pool: NodePool::new(pooling),
            root: NodeId::NIL,
            len: 0,
            track_size,
            stats: Stats::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every node keeps the size of its subtree up to date.
    pub fn tracks_size(&self) -> bool {
        self.track_size
    }

    pub fn pool(&self) -> &NodePool<K, M> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut NodePool<K, M> {
        &mut self.pool
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    /// Returns the child of `id` on `side`. The sentinel has only sentinel children.
    pub fn child(&self, id: NodeId, side: Side) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.pool[id].child(side)
        }
    }

    pub fn left(&self, id: NodeId) -> NodeId {
        self.child(id, Side::Left)
    }

    pub fn right(&self, id: NodeId) -> NodeId {
        self.child(id, Side::Right)
    }

    pub fn parent(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.pool[id].parent
        }
    }

    /// Returns the size of the subtree rooted at `id`. Only meaningful when sizes are tracked.
    pub fn size(&self, id: NodeId) -> usize {
        if id.is_nil() {
            0
        } else {
            self.pool[id].size
        }
    }

    /// Returns which child slot of its parent holds `id`, or `None` for the root.
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.parent(id);
        if parent.is_nil() {
            None
        } else if self.pool[parent].left == id {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Returns the node reached by following `side` links from `id` as far as possible.
    pub fn extreme(&self, id: NodeId, side: Side) -> NodeId {
        let mut curr = id;
        loop {
            let next = self.child(curr, side);
            if next.is_nil() {
                return curr;
            }
            curr = next;
        }
    }

    // Stores `child` in the `side` slot of `parent`, or in the root slot if `parent` is the
    // sentinel, and points the child back at its new parent.
    fn set_child(&mut self, parent: NodeId, side: Side, child: NodeId) {
        if parent.is_nil() {
            self.root = child;
        } else {
            *self.pool[parent].child_mut(side) = child;
        }
        if !child.is_nil() {
            self.pool[child].parent = parent;
        }
    }

    fn adjust_sizes(&mut self, from: NodeId, grow: bool) {
        if !self.track_size {
            return;
        }
        let mut curr = from;
        while !curr.is_nil() {
            let node = &mut self.pool[curr];
            if grow {
                node.size += 1;
            } else {
                node.size -= 1;
            }
            curr = node.parent;
        }
    }

    /// Acquires a node for `key` and links it as the `side` child of `parent`, which must have
    /// an empty slot there. A sentinel `parent` makes the node the root of an empty tree.
    pub fn attach(&mut self, parent: NodeId, side: Side, key: K, meta: M) -> NodeId {
        debug_assert!(self.child(parent, side).is_nil());
        debug_assert!(!parent.is_nil() || self.root.is_nil());
        let id = self.pool.acquire(key, meta);
        self.set_child(parent, side, id);
        self.adjust_sizes(parent, true);
        self.len += 1;
        id
    }

    /// Descends to the insertion point of `key` and attaches a new leaf there. Returns the
    /// existing node and gives the key back if it is already present.
    pub fn insert_leaf(&mut self, key: K, meta: M) -> Result<NodeId, (NodeId, K)>
    where
        K: Ord,
    {
        let mut parent = NodeId::NIL;
        let mut side = Side::Left;
        let mut curr = self.root;
        while !curr.is_nil() {
            let ordering = key.cmp(&self.pool[curr].key);
            side = match ordering {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Err((curr, key)),
            };
            parent = curr;
            curr = self.child(curr, side);
        }
        Ok(self.attach(parent, side, key, meta))
    }

    /// Removes a node with at most one child from the shape, lifting that child into its slot,
    /// and returns the node's key. The node goes back to the pool.
    ///
    /// # Panics
    ///
    /// Panics if the node has two children.
    pub fn splice(&mut self, id: NodeId) -> K {
        let (left, right, parent) = {
            let node = &self.pool[id];
            (node.left, node.right, node.parent)
        };
        assert!(
            left.is_nil() || right.is_nil(),
            "Expected a node with at most one child.",
        );
        let child = if left.is_nil() { right } else { left };
        let side = self.side_of(id).unwrap_or(Side::Left);
        self.set_child(parent, side, child);
        self.adjust_sizes(parent, false);
        self.len -= 1;
        self.pool.release(id)
    }

    /// Exchanges the keys of two live nodes. Links and metadata stay where they are.
    pub fn swap_keys(&mut self, a: NodeId, b: NodeId) {
        if a != b {
            let (x, y) = self.pool.get_pair_mut(a, b);
            mem::swap(&mut x.key, &mut y.key);
        }
    }

    /// Returns the node holding `key`, or the sentinel if there is none.
    pub fn find<Q>(&self, key: &Q) -> NodeId
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(|node_key| key.cmp(node_key.borrow()))
    }

    /// Returns the node for which `compare` yields `Ordering::Equal`, or the sentinel if there is
    /// none. `compare` orders the sought key against the key of a node.
    pub fn search<F>(&self, compare: F) -> NodeId
    where
        F: Fn(&K) -> Ordering,
    {
        let mut curr = self.root;
        while !curr.is_nil() {
            curr = match compare(&self.pool[curr].key) {
                Ordering::Less => self.left(curr),
                Ordering::Greater => self.right(curr),
                Ordering::Equal => return curr,
            };
        }
        curr
    }

    pub fn min(&self) -> Option<&K> {
        if self.root.is_nil() {
            return None;
        }
        Some(&self.pool[self.extreme(self.root, Side::Left)].key)
    }

    pub fn max(&self) -> Option<&K> {
        if self.root.is_nil() {
            return None;
        }
        Some(&self.pool[self.extreme(self.root, Side::Right)].key)
    }

    /// Releases every node and resets the count.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.len);
        self.pool.clear();
        self.root = NodeId::NIL;
        self.len = 0;
    }

    /// Returns an iterator that yields keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K, M> {
        Iter::new(self)
    }
}

impl<K, M> Index<NodeId> for Tree<K, M> {
    type Output = Node<K, M>;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.pool[id]
    }
}

impl<K, M> IndexMut<NodeId> for Tree<K, M> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.pool[id]
    }
}
