use crate::balancer::{self, Balancer};
use crate::check::{self, Violation};
use crate::config::Config;
use crate::red_black_tree::BottomUp;
use crate::stats::Stats;
use crate::tree::{Iter, Tree};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::marker::PhantomData;

/// An ordered set of unique keys backed by a binary search tree balanced by `B`.
///
/// The balancing schedule is a type parameter: every schedule shares the same node engine, node
/// pool and invariant checker, so sets with different schedules behave identically apart from
/// the shape of the tree and the restructuring work they count in their `Stats`.
///
/// # Examples
///
/// ```
/// use balanced_trees::avl_tree::Avl;
/// use balanced_trees::{BalancedSet, Config, Pooling};
///
/// let mut set: BalancedSet<u32, Avl> =
///     BalancedSet::with_config(Config::new().pooling(Pooling::Preallocated(8)));
/// assert_eq!(set.free_len(), 8);
///
/// assert!(set.insert(2));
/// assert!(set.insert(1));
/// assert!(!set.insert(2));
///
/// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2]);
/// set.check_tree();
/// ```
pub struct BalancedSet<K, B: Balancer = BottomUp> {
    tree: Tree<K, B::Meta>,
    config: Config,
    _marker: PhantomData<B>,
}

impl<K, B> BalancedSet<K, B>
where
    K: Ord,
    B: Balancer,
{
    /// Constructs a new, empty set with the default configuration.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Constructs a new, empty set with a specific configuration.
    pub fn with_config(config: Config) -> Self {
        let (tree, config) = balancer::new_tree::<K, B>(config);
        BalancedSet {
            tree,
            config,
            _marker: PhantomData,
        }
    }

    /// Returns the configuration the set runs with. Subtree sizes may be tracked even if the
    /// configuration passed at construction did not ask for them.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Inserts a key into the set. Returns `false` and leaves the set unchanged if an equal key
    /// is already present.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        B::insert(&mut self.tree, key).is_ok()
    }

    /// Erases a key from the set. Returns `false` if the key is absent.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(set.erase(&1));
    /// assert!(!set.erase(&1));
    /// ```
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Removes a key from the set and returns it. Returns `None` if the key is absent.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(String::from("a"));
    /// assert_eq!(set.remove("a"), Some(String::from("a")));
    /// assert_eq!(set.remove("a"), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        B::erase(&mut self.tree, key, self.config.replacement)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.tree.find(key).is_nil()
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all keys. Node storage is kept for reuse unless pooling is
    /// disabled.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert_eq!(set.free_len(), 2);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&K> {
        self.tree.min()
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&K> {
        self.tree.max()
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, B::Meta> {
        self.tree.iter()
    }

    /// Pushes `count` vacant nodes onto the free list of the set. Has no effect when pooling is
    /// disabled.
    pub fn preallocate(&mut self, count: usize) {
        self.tree.pool_mut().preallocate(count);
    }

    /// Returns the number of vacant nodes on the free list of the set.
    pub fn free_len(&self) -> usize {
        self.tree.pool().free_len()
    }

    /// Returns the restructuring counters accumulated since construction or the last
    /// `reset_stats`.
    ///
    /// # Examples
    /// ```
    /// use balanced_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// for key in 0..3 {
    ///     set.insert(key);
    /// }
    /// assert_eq!(set.stats().left_rotations, 1);
    ///
    /// set.reset_stats();
    /// assert_eq!(set.stats().rotations(), 0);
    /// ```
    pub fn stats(&self) -> Stats {
        *self.tree.stats()
    }

    pub fn reset_stats(&mut self) {
        *self.tree.stats_mut() = Stats::default();
    }

    /// Checks every invariant of the set and returns the first one found broken.
    pub fn validate(&self) -> check::Result<()>
    where
        K: Debug,
    {
        check::check::<K, B>(&self.tree)
    }

    /// Checks every invariant of the set.
    ///
    /// # Panics
    ///
    /// Panics if an invariant is broken.
    pub fn check_tree(&self)
    where
        K: Debug,
    {
        if let Err(violation) = self.validate() {
            fail(&violation);
        }
    }
}

pub(crate) fn fail(violation: &Violation) -> ! {
    error!("invariant check failed: {}", violation);
    panic!("Error: {}.", violation);
}

impl<'a, K, B> IntoIterator for &'a BalancedSet<K, B>
where
    K: 'a + Ord,
    B: Balancer,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K, B::Meta>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, B> Default for BalancedSet<K, B>
where
    K: Ord,
    B: Balancer,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::BalancedSet;
    use crate::avl_tree::Avl;
    use crate::check::Violation;
    use crate::config::{Config, Pooling, Replacement};
    use crate::red_black_tree::{BottomUp, Color, LeftLeaning, TopDown};

    // Builds     2
    //           / \
    //          1   3
    //         /
    //        0
    // with a red 0 below a black 1, then paints 1 red.
    fn red_red_set() -> BalancedSet<u32> {
        let mut set = BalancedSet::new();
        for key in &[2, 1, 3, 0] {
            set.insert(*key);
        }
        let one = set.tree.find(&1);
        assert_eq!(set.tree[one].meta, Color::Black);
        set.tree[one].meta = Color::Red;
        set
    }

    #[test]
    fn test_len_empty() {
        let set: BalancedSet<u32> = BalancedSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: BalancedSet<u32, Avl> = BalancedSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: BalancedSet<u32, TopDown> = BalancedSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut set: BalancedSet<u32> = BalancedSet::new();
        assert!(set.insert(1));
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set: BalancedSet<u32, LeftLeaning> = BalancedSet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_erase() {
        let mut set: BalancedSet<u32, Avl> = BalancedSet::new();
        set.insert(1);
        assert!(set.erase(&1));
        assert!(!set.contains(&1));
        assert!(!set.erase(&1));
    }

    #[test]
    fn test_erase_empty() {
        let mut set: BalancedSet<u32, TopDown> = BalancedSet::new();
        assert!(!set.erase(&1));
        set.check_tree();
    }

    #[test]
    fn test_min_max() {
        let mut set: BalancedSet<u32> = BalancedSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_iter() {
        let mut set: BalancedSet<u32, Avl> = BalancedSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!((&set).into_iter().count(), 3);
    }

    #[test]
    fn test_track_size_enabled() {
        let set: BalancedSet<u32, BottomUp> = BalancedSet::new();
        assert!(set.config().track_size);

        let set: BalancedSet<u32, BottomUp> =
            BalancedSet::with_config(Config::new().replacement(Replacement::Successor));
        assert!(!set.config().track_size);

        let set: BalancedSet<u32, Avl> = BalancedSet::new();
        assert!(!set.config().track_size);
    }

    #[test]
    fn test_clear_keeps_pool() {
        let mut set: BalancedSet<u32> = BalancedSet::new();
        for key in 0..10 {
            set.insert(key);
        }
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.free_len(), 10);
        set.insert(4);
        assert_eq!(set.free_len(), 9);
    }

    #[test]
    fn test_clear_disabled_pool() {
        let mut set: BalancedSet<u32> =
            BalancedSet::with_config(Config::new().pooling(Pooling::Disabled));
        for key in 0..10 {
            set.insert(key);
        }
        set.clear();
        assert_eq!(set.free_len(), 0);
    }

    #[test]
    fn test_preallocate() {
        let mut set: BalancedSet<u32, Avl> = BalancedSet::new();
        set.preallocate(4);
        assert_eq!(set.free_len(), 4);
        set.insert(1);
        assert_eq!(set.free_len(), 3);
    }

    #[test]
    fn test_reset_stats() {
        let mut set: BalancedSet<u32> = BalancedSet::new();
        for key in 0..16 {
            set.insert(key);
        }
        assert!(set.stats().rotations() > 0);
        set.reset_stats();
        assert_eq!(set.stats().rotations(), 0);
    }

    #[test]
    fn test_check_tree() {
        let mut set: BalancedSet<u32> = BalancedSet::new();
        for key in 0..16 {
            set.insert(key);
        }
        assert_eq!(set.validate(), Ok(()));
        set.check_tree();
    }

    #[test]
    fn test_validate_red_red() {
        let set = red_red_set();
        assert_eq!(
            set.validate(),
            Err(Violation::RedRed { key: String::from("1") }),
        );
    }

    #[test]
    #[should_panic]
    fn test_check_tree_red_red() {
        red_red_set().check_tree();
    }
}
