//! Self-balancing binary search trees that use a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Four schedules share the same coloring rules. `BottomUp` attaches a red leaf and repairs
//! upward after every mutation. `TopDown` splits and rotates on the way down so that a single
//! pass suffices. `LeftLeaning` additionally forbids red right links. `Hybrid` inserts top-down
//! and erases bottom-up.

mod bottom_up;
mod hybrid;
mod left_leaning;
mod node;
mod top_down;

pub use self::bottom_up::BottomUp;
pub use self::hybrid::Hybrid;
pub use self::left_leaning::LeftLeaning;
pub use self::node::Color;
pub use self::top_down::TopDown;

use self::node::is_red;
use crate::check::{self, describe, Violation};
use crate::map::BalancedMap;
use crate::node::NodeId;
use crate::set::BalancedSet;
use crate::tree::Tree;
use std::fmt::Debug;

/// An ordered set implemented using a bottom-up red black tree.
///
/// # Examples
///
/// ```
/// use balanced_trees::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// assert!(set.insert(0));
/// assert!(set.insert(3));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.max(), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub type RedBlackSet<K> = BalancedSet<K, BottomUp>;

/// An ordered map implemented using a bottom-up red black tree.
pub type RedBlackMap<K, V> = BalancedMap<K, V, BottomUp>;

/// An ordered set implemented using a top-down red black tree.
///
/// # Examples
///
/// ```
/// use balanced_trees::red_black_tree::TopDownSet;
///
/// let mut set = TopDownSet::new();
/// for key in 0..16 {
///     set.insert(key);
/// }
/// assert!(set.erase(&7));
/// assert!(!set.contains(&7));
/// set.check_tree();
/// ```
pub type TopDownSet<K> = BalancedSet<K, TopDown>;

/// An ordered map implemented using a top-down red black tree.
pub type TopDownMap<K, V> = BalancedMap<K, V, TopDown>;

/// An ordered set implemented using a left-leaning red black tree.
///
/// Erasures always take the replacement of a node with two children from its right subtree.
pub type LeftLeaningSet<K> = BalancedSet<K, LeftLeaning>;

/// An ordered map implemented using a left-leaning red black tree.
pub type LeftLeaningMap<K, V> = BalancedMap<K, V, LeftLeaning>;

/// An ordered set implemented using a red black tree that inserts top-down and erases bottom-up.
pub type HybridSet<K> = BalancedSet<K, Hybrid>;

/// An ordered map implemented using a red black tree that inserts top-down and erases bottom-up.
pub type HybridMap<K, V> = BalancedMap<K, V, Hybrid>;

fn audit<K: Debug>(tree: &Tree<K, Color>, left_leaning: bool) -> check::Result<()> {
    if is_red(tree, tree.root()) {
        return Err(Violation::RedRoot);
    }
    black_height(tree, tree.root(), left_leaning).map(|_| ())
}

fn black_height<K: Debug>(
    tree: &Tree<K, Color>,
    node: NodeId,
    left_leaning: bool,
) -> check::Result<usize> {
    if node.is_nil() {
        return Ok(1);
    }
    let (left, right) = (tree.left(node), tree.right(node));
    match tree[node].meta {
        Color::DoubleBlack => {
            return Err(Violation::DoubleBlack { key: describe(&tree[node].key) });
        },
        Color::Red if is_red(tree, left) || is_red(tree, right) => {
            return Err(Violation::RedRed { key: describe(&tree[node].key) });
        },
        _ => {},
    }
    if left_leaning && is_red(tree, right) {
        return Err(Violation::RedRight { key: describe(&tree[node].key) });
    }

    let left_height = black_height(tree, left, left_leaning)?;
    let right_height = black_height(tree, right, left_leaning)?;
    if left_height != right_height {
        return Err(Violation::BlackHeight {
            key: describe(&tree[node].key),
            left: left_height,
            right: right_height,
        });
    }
    match tree[node].meta {
        Color::Red => Ok(left_height),
        _ => Ok(left_height + 1),
    }
}
