use crate::balancer::{self, Balancer};
use crate::check;
use crate::config::Config;
use crate::entry::Entry;
use crate::node::NodeId;
use crate::red_black_tree::BottomUp;
use crate::set;
use crate::stats::Stats;
use crate::tree::{self, Tree};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::marker::PhantomData;

/// An ordered map backed by a binary search tree balanced by `B`.
///
/// Entries are ordered by key alone, so a map shares the node engine and the balancing schedules
/// of `BalancedSet`.
///
/// # Examples
///
/// ```
/// use balanced_trees::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// assert!(map.insert(0, 1));
/// assert!(map.insert(3, 4));
///
/// assert_eq!(map.get(&0), Some(&1));
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
///
/// *map.get_mut(&0).unwrap() = 2;
/// assert_eq!(map.remove(&0), Some(2));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct BalancedMap<K, V, B: Balancer = BottomUp> {
    tree: Tree<Entry<K, V>, B::Meta>,
    config: Config,
    _marker: PhantomData<B>,
}

impl<K, V, B> BalancedMap<K, V, B>
where
    K: Ord,
    B: Balancer,
{
    /// Constructs a new, empty map with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Constructs a new, empty map with a specific configuration.
    pub fn with_config(config: Config) -> Self {
        let (tree, config) = balancer::new_tree::<Entry<K, V>, B>(config);
        BalancedMap {
            tree,
            config,
            _marker: PhantomData,
        }
    }

    /// Returns the configuration the map runs with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// overwritten and `false` is returned.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert!(map.insert(1, 1));
    /// assert!(!map.insert(1, 2));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match B::insert(&mut self.tree, Entry { key, value }) {
            Ok(_) => true,
            Err((node, entry)) => {
                self.tree[node].key.value = entry.value;
                false
            },
        }
    }

    /// Erases a key from the map. Returns `false` if the key is absent.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Removes a key from the map and returns its value. Returns `None` if the key is absent.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(String::from("a"), 1);
    /// assert_eq!(map.remove("a"), Some(1));
    /// assert_eq!(map.remove("a"), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let compare = |entry: &Entry<K, V>| key.cmp(entry.key.borrow());
        B::erase_by(&mut self.tree, compare, self.config.replacement).map(|entry| entry.value)
    }

    fn find<Q>(&self, key: &Q) -> NodeId
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.search(|entry| key.cmp(entry.key.borrow()))
    }

    /// Checks if a key exists in the map.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find(key).is_nil()
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `None` if such a key does not exist.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find(key);
        if node.is_nil() {
            None
        } else {
            Some(&self.tree[node].key.value)
        }
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find(key);
        if node.is_nil() {
            None
        } else {
            Some(&mut self.tree[node].key.value)
        }
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    pub fn min(&self) -> Option<&K> {
        self.tree.min().map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    pub fn max(&self) -> Option<&K> {
        self.tree.max().map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::red_black_tree::TopDownMap;
    ///
    /// let mut map = TopDownMap::new();
    /// map.insert(3, 2);
    /// map.insert(1, 1);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> BalancedMapIter<'_, K, V, B::Meta> {
        BalancedMapIter {
            tree_iter: self.tree.iter(),
        }
    }

    /// Pushes `count` vacant nodes onto the free list of the map. Has no effect when pooling is
    /// disabled.
    pub fn preallocate(&mut self, count: usize) {
        self.tree.pool_mut().preallocate(count);
    }

    /// Returns the number of vacant nodes on the free list of the map.
    pub fn free_len(&self) -> usize {
        self.tree.pool().free_len()
    }

    pub fn stats(&self) -> Stats {
        *self.tree.stats()
    }

    pub fn reset_stats(&mut self) {
        *self.tree.stats_mut() = Stats::default();
    }

    /// Checks every invariant of the map and returns the first one found broken.
    pub fn validate(&self) -> check::Result<()>
    where
        K: Debug,
    {
        check::check::<Entry<K, V>, B>(&self.tree)
    }

    /// Checks every invariant of the map.
    ///
    /// # Panics
    ///
    /// Panics if an invariant is broken.
    pub fn check_tree(&self)
    where
        K: Debug,
    {
        if let Err(violation) = self.validate() {
            set::fail(&violation);
        }
    }
}

impl<'a, K, V, B> IntoIterator for &'a BalancedMap<K, V, B>
where
    K: 'a + Ord,
    V: 'a,
    B: Balancer,
{
    type Item = (&'a K, &'a V);
    type IntoIter = BalancedMapIter<'a, K, V, B::Meta>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `BalancedMap<K, V, B>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct BalancedMapIter<'a, K, V, M> {
    tree_iter: tree::Iter<'a, Entry<K, V>, M>,
}

impl<'a, K, V, M> Clone for BalancedMapIter<'a, K, V, M> {
    fn clone(&self) -> Self {
        BalancedMapIter {
            tree_iter: self.tree_iter.clone(),
        }
    }
}

impl<'a, K, V, M> Iterator for BalancedMapIter<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<K, V, B> Default for BalancedMap<K, V, B>
where
    K: Ord,
    B: Balancer,
{
    fn default() -> Self {
        Self::new()
    }
}
