//! Node pool that recycles node storage across erase and insert cycles.

use crate::config::Pooling;
use crate::node::{Node, NodeId};
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

enum Block<K, M> {
    Occupied(Node<K, M>),
    Vacant(NodeId),
}

/// A typed arena of tree nodes addressed by `NodeId`.
///
/// Released nodes give their key back to the caller and leave a vacant block behind. Vacant
/// blocks are threaded into a free list through their `NodeId` so that later acquisitions reuse
/// them instead of growing the underlying `Vec`. The pool is private to one tree and uses no
/// unsafe code.
///
/// # Examples
///
/// ```
/// use balanced_trees::pool::NodePool;
/// use balanced_trees::Pooling;
///
/// let mut pool = NodePool::new(Pooling::Lazy);
///
/// let x = pool.acquire(1, ());
/// assert_eq!(pool[x].key, 1);
///
/// assert_eq!(pool.release(x), 1);
/// assert_eq!(pool.free_len(), 1);
///
/// let y = pool.acquire(2, ());
/// assert_eq!(x, y);
/// ```
pub struct NodePool<K, M> {
    head: NodeId,
    blocks: Vec<Block<K, M>>,
    len: usize,
    pooling: Pooling,
}

impl<K, M> NodePool<K, M> {
    /// Constructs a new, empty `NodePool<K, M>`. `Pooling::Preallocated(n)` fills the free list
    /// with `n` vacant blocks right away.
    pub fn new(pooling: Pooling) -> Self {
        let mut pool = NodePool {
            head: NodeId::NIL,
            blocks: Vec::new(),
            len: 0,
            pooling,
        };
        if let Pooling::Preallocated(count) = pooling {
            pool.preallocate(count);
        }
        pool
    }

    fn is_valid_id(&self, id: NodeId) -> bool {
        id.index() < self.blocks.len()
    }

    /// Returns a node holding `key` and `meta` with empty links. The node comes from the free
    /// list when one is available and from fresh storage otherwise.
    pub fn acquire(&mut self, key: K, meta: M) -> NodeId {
        let node = Node::new(key, meta);
        if self.head.is_nil() {
            self.blocks.push(Block::Occupied(node));
            self.len += 1;
            return NodeId::new(self.blocks.len() - 1);
        }

        let id = self.head;
        match mem::replace(&mut self.blocks[id.index()], Block::Occupied(node)) {
            Block::Vacant(next) => {
                self.head = next;
                self.len += 1;
                id
            },
            Block::Occupied(_) => panic!("Error: free list points at an occupied block."),
        }
    }

    /// Detaches a node from the pool, pushes its block onto the free list and returns its key.
    ///
    /// # Panics
    ///
    /// Panics if `id` corresponds to an invalid or vacant block.
    pub fn release(&mut self, id: NodeId) -> K {
        if !self.is_valid_id(id) {
            panic!("Error: attempting to release invalid block.");
        }
        let old_block = mem::replace(&mut self.blocks[id.index()], Block::Vacant(self.head));
        match old_block {
            Block::Vacant(_) => panic!("Error: attempting to release vacant block."),
            Block::Occupied(node) => {
                self.len -= 1;
                if self.pooling == Pooling::Disabled {
                    self.trim();
                } else {
                    self.head = id;
                }
                node.key
            },
        }
    }

    /// Pushes `count` vacant blocks onto the free list so that the next `count` acquisitions do
    /// not allocate. Has no effect when pooling is disabled.
    pub fn preallocate(&mut self, count: usize) {
        if self.pooling == Pooling::Disabled {
            debug!("pooling is disabled, ignoring preallocation of {} nodes", count);
            return;
        }
        self.blocks.reserve(count);
        for _ in 0..count {
            self.blocks.push(Block::Vacant(self.head));
            self.head = NodeId::new(self.blocks.len() - 1);
        }
        debug!("preallocated {} nodes, capacity is now {}", count, self.blocks.len());
    }

    /// Releases every node. Storage is kept on the free list unless pooling is disabled.
    pub fn clear(&mut self) {
        if self.pooling == Pooling::Disabled {
            self.drop_storage();
            return;
        }
        self.head = NodeId::NIL;
        for index in (0..self.blocks.len()).rev() {
            self.blocks[index] = Block::Vacant(self.head);
            self.head = NodeId::new(index);
        }
        self.len = 0;
    }

    // Without pooling, vacant blocks are never reused. Trailing ones are popped and the whole
    // storage goes once the pool drains.
    fn trim(&mut self) {
        if self.len == 0 {
            self.drop_storage();
            return;
        }
        while let Some(Block::Vacant(_)) = self.blocks.last() {
            self.blocks.pop();
        }
    }

    fn drop_storage(&mut self) {
        debug!("dropping storage of {} blocks", self.blocks.len());
        self.blocks = Vec::new();
        self.head = NodeId::NIL;
        self.len = 0;
    }

    /// Returns the number of nodes currently handed out.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no node is currently handed out.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of blocks on the free list. There is no free list when pooling is
    /// disabled.
    pub fn free_len(&self) -> usize {
        if self.pooling == Pooling::Disabled {
            0
        } else {
            self.blocks.len() - self.len
        }
    }

    /// Returns the pooling mode the pool was built with.
    pub fn pooling(&self) -> Pooling {
        self.pooling
    }

    /// Returns an immutable reference to a node. Returns `None` if the id does not correspond to
    /// a live node.
    pub fn get(&self, id: NodeId) -> Option<&Node<K, M>> {
        if !self.is_valid_id(id) {
            return None;
        }
        match self.blocks[id.index()] {
            Block::Occupied(ref node) => Some(node),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to a node. Returns `None` if the id does not correspond to a
    /// live node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K, M>> {
        if !self.is_valid_id(id) {
            return None;
        }
        match self.blocks[id.index()] {
            Block::Occupied(ref mut node) => Some(node),
            Block::Vacant(_) => None,
        }
    }

    /// Returns mutable references to two distinct live nodes.
    ///
    /// # Panics
    ///
    /// Panics if the ids are equal or if either one does not correspond to a live node.
    pub fn get_pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut Node<K, M>, &mut Node<K, M>) {
        assert!(a != b, "Error: expected two distinct node ids.");
        let (low, high) = if a.index() < b.index() { (a, b) } else { (b, a) };
        if !self.is_valid_id(high) {
            panic!("Error: node id out of bounds.");
        }
        let (head, tail) = self.blocks.split_at_mut(high.index());
        match (&mut head[low.index()], &mut tail[0]) {
            (Block::Occupied(x), Block::Occupied(y)) => {
                if low == a {
                    (x, y)
                } else {
                    (y, x)
                }
            },
            _ => panic!("Error: node id out of bounds."),
        }
    }
}

impl<K, M> Index<NodeId> for NodePool<K, M> {
    type Output = Node<K, M>;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Error: node id out of bounds.")
    }
}

impl<K, M> IndexMut<NodeId> for NodePool<K, M> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Error: node id out of bounds.")
    }
}
