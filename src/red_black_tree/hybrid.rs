use super::node::Color;
use super::{bottom_up, top_down};
use crate::balancer::Balancer;
use crate::check;
use crate::node::NodeId;
use crate::tree::Tree;
use std::fmt::Debug;

/// A red black schedule that inserts top-down and erases bottom-up.
///
/// Both halves maintain the same coloring rules, so they can be mixed freely on one tree.
pub struct Hybrid;

impl Balancer for Hybrid {
    type Meta = Color;

    const SIZE_GUIDED: bool = true;

    fn initial_meta() -> Color {
        Color::Red
    }

    fn insert<K: Ord>(tree: &mut Tree<K, Color>, key: K) -> Result<NodeId, (NodeId, K)> {
        top_down::insert(tree, key)
    }

    fn after_erase<K>(tree: &mut Tree<K, Color>, victim: NodeId) -> K {
        bottom_up::fix_erasure(tree, victim)
    }

    fn audit<K: Debug>(tree: &Tree<K, Color>) -> check::Result<()> {
        super::audit(tree, false)
    }
}
