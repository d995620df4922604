//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.
//!
//! Every node stores a balance factor in `[-1, 1]`: the height of its right subtree minus the
//! height of its left subtree. Insertions and erasures recurse down to the affected leaf and
//! repair the factors on the way back up, stopping as soon as a subtree keeps its height.

mod tree;

pub use self::tree::Avl;

use crate::map::BalancedMap;
use crate::set::BalancedSet;

/// An ordered set implemented using an avl tree.
///
/// # Examples
///
/// ```
/// use balanced_trees::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// assert!(set.insert(0));
/// assert!(set.insert(3));
/// assert!(!set.insert(3));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.min(), Some(&0));
///
/// assert!(set.erase(&0));
/// assert!(!set.erase(&1));
/// set.check_tree();
/// ```
pub type AvlSet<K> = BalancedSet<K, Avl>;

/// An ordered map implemented using an avl tree.
///
/// # Examples
///
/// ```
/// use balanced_trees::avl_tree::AvlMap;
///
/// let mut map = AvlMap::new();
/// assert!(map.insert(1, "a"));
/// assert!(!map.insert(1, "b"));
/// assert_eq!(map.get(&1), Some(&"b"));
/// ```
pub type AvlMap<K, V> = BalancedMap<K, V, Avl>;
