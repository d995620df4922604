//! The seam between the node engine and a balancing schedule.

use crate::check;
use crate::config::{Config, Replacement};
use crate::node::{NodeId, Side};
use crate::tree::Tree;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::Debug;

/// A balancing schedule for a `Tree`.
///
/// A schedule decides what metadata every node carries and how the shape is repaired after a
/// mutation. The default `insert` attaches a leaf and hands it to `after_insert`. The default
/// `erase_by` reduces the erasure to a node with at most one child, by swapping keys with the
/// replacement chosen through `Replacement`, and hands that node to `after_erase`, which must
/// splice it out. Schedules that repair the shape while descending override `insert` or
/// `erase_by` directly.
pub trait Balancer {
    /// The per-node balance metadata.
    type Meta: Copy + Debug + PartialEq;

    /// Whether `Replacement::Preferred` compares subtree sizes, which requires sizes to be
    /// tracked.
    const SIZE_GUIDED: bool = false;

    /// Returns the metadata of a freshly inserted node.
    fn initial_meta() -> Self::Meta;

    /// Inserts `key`. Returns the new node, or the node already holding an equal key along with
    /// the rejected key.
    fn insert<K: Ord>(tree: &mut Tree<K, Self::Meta>, key: K) -> Result<NodeId, (NodeId, K)> {
        let node = tree.insert_leaf(key, Self::initial_meta())?;
        Self::after_insert(tree, node);
        Ok(node)
    }

    /// Repairs the shape after `node` was attached as a leaf.
    fn after_insert<K>(_tree: &mut Tree<K, Self::Meta>, _node: NodeId) {}

    /// Erases the key equal to `key` and returns it.
    fn erase<K, Q>(tree: &mut Tree<K, Self::Meta>, key: &Q, replacement: Replacement) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Self::erase_by(tree, |node_key: &K| key.cmp(node_key.borrow()), replacement)
    }

    /// Erases the key for which `compare` yields `Ordering::Equal` and returns it. `compare`
    /// orders the erased key against the key of a node.
    fn erase_by<K, F>(
        tree: &mut Tree<K, Self::Meta>,
        compare: F,
        replacement: Replacement,
    ) -> Option<K>
    where
        F: Fn(&K) -> Ordering,
    {
        let target = tree.search(compare);
        if target.is_nil() {
            return None;
        }
        let victim = if tree.left(target).is_nil() || tree.right(target).is_nil() {
            target
        } else {
            let side = replacement_side::<K, Self>(tree, target, replacement);
            let victim = tree.extreme(tree.child(target, side), side.opposite());
            tree.swap_keys(target, victim);
            victim
        };
        Some(Self::after_erase(tree, victim))
    }

    /// Repairs the shape around `victim`, a node with at most one child that holds the erased
    /// key, splices it out and returns its key.
    fn after_erase<K>(tree: &mut Tree<K, Self::Meta>, victim: NodeId) -> K {
        tree.splice(victim)
    }

    /// Returns the subtree of `node` that `Replacement::Preferred` takes the replacement from.
    /// The default picks the larger subtree when sizes are tracked and the successor otherwise.
    fn preferred_side<K>(tree: &Tree<K, Self::Meta>, node: NodeId) -> Side {
        if tree.tracks_size() && tree.size(tree.left(node)) > tree.size(tree.right(node)) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Checks the schedule-specific invariants of a structurally sound tree.
    fn audit<K: Debug>(tree: &Tree<K, Self::Meta>) -> check::Result<()>;
}

/// Returns the subtree of `node` the replacement of an erased key comes from: the right subtree
/// for a successor, the left one for a predecessor.
pub fn replacement_side<K, B>(
    tree: &Tree<K, B::Meta>,
    node: NodeId,
    replacement: Replacement,
) -> Side
where
    B: Balancer + ?Sized,
{
    let side = match replacement {
        Replacement::Successor => Side::Right,
        Replacement::Predecessor => Side::Left,
        Replacement::Preferred => B::preferred_side(tree, node),
    };
    trace!("replacing {:?} from the {:?} subtree", node, side);
    side
}

/// Returns the configuration a tree balanced by `B` runs with. Size-guided schedules need
/// subtree sizes to honor `Replacement::Preferred`.
pub(crate) fn effective_config<B: Balancer>(config: Config) -> Config {
    let track_size =
        config.track_size || (B::SIZE_GUIDED && config.replacement == Replacement::Preferred);
    config.track_size(track_size)
}

/// Constructs an empty tree for `B` along with the configuration it runs with.
pub(crate) fn new_tree<K, B: Balancer>(config: Config) -> (Tree<K, B::Meta>, Config) {
    let config = effective_config::<B>(config);
    debug!("constructing tree with {:?}", config);
    (Tree::new(config.pooling, config.track_size), config)
}
