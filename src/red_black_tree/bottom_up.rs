use super::node::{color, is_red, set_color, Color};
use crate::balancer::Balancer;
use crate::check;
use crate::node::NodeId;
use crate::tree::Tree;
use std::fmt::Debug;

/// The bottom-up red black schedule.
///
/// New keys are attached as red leaves and red-red conflicts are pushed toward the root. An
/// erased black leaf is marked double black and the extra black is pushed toward the root the
/// same way, while the leaf stays linked; it is spliced out once the repair is done.
pub struct BottomUp;

impl Balancer for BottomUp {
    type Meta = Color;

    const SIZE_GUIDED: bool = true;

    fn initial_meta() -> Color {
        Color::Red
    }

    fn after_insert<K>(tree: &mut Tree<K, Color>, node: NodeId) {
        fix_insertion(tree, node);
    }

    fn after_erase<K>(tree: &mut Tree<K, Color>, victim: NodeId) -> K {
        fix_erasure(tree, victim)
    }

    fn audit<K: Debug>(tree: &Tree<K, Color>) -> check::Result<()> {
        super::audit(tree, false)
    }
}

pub(super) fn fix_insertion<K>(tree: &mut Tree<K, Color>, node: NodeId) {
    let mut node = node;
    loop {
        let parent = tree.parent(node);
        if !is_red(tree, parent) {
            break;
        }
        let grandparent = tree.parent(parent);
        let side = tree
            .side_of(parent)
            .expect("Expected a red node to have a parent.");
        let uncle = tree.child(grandparent, side.opposite());

        if is_red(tree, uncle) {
            tree[parent].meta = Color::Black;
            tree[uncle].meta = Color::Black;
            tree[grandparent].meta = Color::Red;
            tree.stats_mut().recolors += 1;
            node = grandparent;
            continue;
        }

        let mut top = parent;
        if tree.side_of(node) != Some(side) {
            tree.rotate(parent, side);
            tree.stats_mut().double_rotations += 1;
            top = node;
        }
        tree.rotate(grandparent, side.opposite());
        tree[top].meta = Color::Black;
        tree[grandparent].meta = Color::Red;
        break;
    }
    let root = tree.root();
    tree[root].meta = Color::Black;
}

pub(super) fn fix_erasure<K>(tree: &mut Tree<K, Color>, victim: NodeId) -> K {
    let child = if tree.left(victim).is_nil() {
        tree.right(victim)
    } else {
        tree.left(victim)
    };

    // A red node with at most one child is a leaf.
    if tree[victim].meta == Color::Red || tree.root() == victim {
        let key = tree.splice(victim);
        let root = tree.root();
        set_color(tree, root, Color::Black);
        return key;
    }
    if is_red(tree, child) {
        tree[child].meta = Color::Black;
        return tree.splice(victim);
    }

    tree[victim].meta = Color::DoubleBlack;
    let mut node = victim;
    while node != tree.root() && tree[node].meta == Color::DoubleBlack {
        let parent = tree.parent(node);
        let side = tree
            .side_of(node)
            .expect("Expected a double black node to have a parent.");
        let mut sibling = tree.child(parent, side.opposite());

        if is_red(tree, sibling) {
            tree[sibling].meta = Color::Black;
            tree[parent].meta = Color::Red;
            tree.rotate(parent, side);
            sibling = tree.child(parent, side.opposite());
        }

        let near = tree.child(sibling, side);
        let far = tree.child(sibling, side.opposite());
        if !is_red(tree, near) && !is_red(tree, far) {
            tree[sibling].meta = Color::Red;
            tree[node].meta = Color::Black;
            tree[parent].meta = match tree[parent].meta {
                Color::Red => Color::Black,
                _ => Color::DoubleBlack,
            };
            tree.stats_mut().recolors += 1;
            node = parent;
            continue;
        }

        if !is_red(tree, far) {
            tree[near].meta = Color::Black;
            tree[sibling].meta = Color::Red;
            tree.rotate(sibling, side.opposite());
            tree.stats_mut().double_rotations += 1;
            sibling = near;
        }

        let far = tree.child(sibling, side.opposite());
        let parent_color = color(tree, parent);
        tree[sibling].meta = parent_color;
        tree[parent].meta = Color::Black;
        set_color(tree, far, Color::Black);
        tree.rotate(parent, side);
        tree[node].meta = Color::Black;
        break;
    }

    let root = tree.root();
    tree[root].meta = Color::Black;
    tree.splice(victim)
}
