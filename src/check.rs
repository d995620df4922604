//! Invariant checking for balanced trees.
//!
//! The structural walk is shared by every schedule: in-order keys must be strictly increasing,
//! every child must point back at its parent, the number of reachable nodes must match the live
//! count and, when sizes are tracked, every stored size must match its subtree. Schedule-specific
//! rules are checked afterwards through `Balancer::audit`.

use crate::balancer::Balancer;
use crate::node::NodeId;
use crate::tree::Tree;
use std::error;
use std::fmt;
use std::result;

/// The first invariant found broken in a tree. Keys are rendered with their `Debug` output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    /// `next` follows `key` in order but does not compare greater.
    Order { key: String, next: String },
    /// The node holding `key` does not point back at its parent.
    Parent { key: String },
    /// The stored subtree size of `key` disagrees with the number of nodes below it.
    Size { key: String, stored: usize, actual: usize },
    /// The number of reachable nodes disagrees with the live count.
    Count { stored: usize, actual: usize },
    /// The balance factor of `key` is outside of `[-1, 1]`.
    BalanceRange { key: String, balance: i8 },
    /// The balance factor of `key` disagrees with the heights of its subtrees.
    BalanceHeight { key: String, balance: i8, actual: i64 },
    /// The root is red.
    RedRoot,
    /// The node holding `key` is still marked double black.
    DoubleBlack { key: String },
    /// The red node holding `key` has a red child.
    RedRed { key: String },
    /// The node holding `key` has a red right child in a left-leaning tree.
    RedRight { key: String },
    /// The paths below `key` carry different numbers of black nodes.
    BlackHeight { key: String, left: usize, right: usize },
}

impl error::Error for Violation {
    fn description(&self) -> &str {
        match self {
            Violation::Order { .. } => "keys out of order",
            Violation::Parent { .. } => "broken parent link",
            Violation::Size { .. } => "stale subtree size",
            Violation::Count { .. } => "live count mismatch",
            Violation::BalanceRange { .. } => "balance factor out of range",
            Violation::BalanceHeight { .. } => "balance factor disagrees with heights",
            Violation::RedRoot => "red root",
            Violation::DoubleBlack { .. } => "double black node",
            Violation::RedRed { .. } => "red node with a red child",
            Violation::RedRight { .. } => "red right link",
            Violation::BlackHeight { .. } => "unequal black heights",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Violation::Order { key, next } => write!(f, "key {} is followed by {}", key, next),
            Violation::Parent { key } => {
                write!(f, "node {} does not point back at its parent", key)
            },
            Violation::Size { key, stored, actual } => {
                write!(f, "node {} stores size {} but holds {} nodes", key, stored, actual)
            },
            Violation::Count { stored, actual } => {
                write!(f, "tree counts {} nodes but {} are live", stored, actual)
            },
            Violation::BalanceRange { key, balance } => {
                write!(f, "node {} has balance factor {}", key, balance)
            },
            Violation::BalanceHeight { key, balance, actual } => write!(
                f,
                "node {} stores balance factor {} but its subtrees differ by {}",
                key, balance, actual,
            ),
            Violation::RedRoot => write!(f, "the root is red"),
            Violation::DoubleBlack { key } => write!(f, "node {} is double black", key),
            Violation::RedRed { key } => write!(f, "red node {} has a red child", key),
            Violation::RedRight { key } => write!(f, "node {} has a red right child", key),
            Violation::BlackHeight { key, left, right } => write!(
                f,
                "node {} has black height {} on the left and {} on the right",
                key, left, right,
            ),
        }
    }
}

pub type Result<T> = result::Result<T, Violation>;

pub(crate) fn describe<K: fmt::Debug>(key: &K) -> String {
    format!("{:?}", key)
}

/// Checks the structure shared by every schedule, then the rules of `B`.
pub fn check<K, B>(tree: &Tree<K, B::Meta>) -> Result<()>
where
    K: Ord + fmt::Debug,
    B: Balancer,
{
    check_structure(tree)?;
    B::audit(tree)
}

/// Checks ordering, parent links, subtree sizes and the live count.
pub fn check_structure<K, M>(tree: &Tree<K, M>) -> Result<()>
where
    K: Ord + fmt::Debug,
{
    let root = tree.root();
    if !root.is_nil() && !tree.parent(root).is_nil() {
        return Err(Violation::Parent { key: describe(&tree[root].key) });
    }
    let mut prev = None;
    let actual = walk(tree, root, &mut prev)?;
    if actual != tree.len() || tree.pool().len() != tree.len() {
        return Err(Violation::Count {
            stored: tree.len(),
            actual,
        });
    }
    Ok(())
}

fn walk<'a, K, M>(tree: &'a Tree<K, M>, id: NodeId, prev: &mut Option<&'a K>) -> Result<usize>
where
    K: Ord + fmt::Debug,
{
    if id.is_nil() {
        return Ok(0);
    }
    let node = &tree[id];
    for child in &[node.left, node.right] {
        if !child.is_nil() && tree.parent(*child) != id {
            return Err(Violation::Parent { key: describe(&tree[*child].key) });
        }
    }

    let left = walk(tree, node.left, prev)?;
    if let Some(prev_key) = *prev {
        if *prev_key >= node.key {
            return Err(Violation::Order {
                key: describe(prev_key),
                next: describe(&node.key),
            });
        }
    }
    *prev = Some(&node.key);
    let right = walk(tree, node.right, prev)?;

    let actual = left + right + 1;
    if tree.tracks_size() && node.size != actual {
        return Err(Violation::Size {
            key: describe(&node.key),
            stored: node.size,
            actual,
        });
    }
    Ok(actual)
}
