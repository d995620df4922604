use super::node::{is_red, set_color, Color};
use crate::balancer::{self, Balancer};
use crate::check;
use crate::config::Replacement;
use crate::node::{NodeId, Side};
use crate::tree::Tree;
use std::cmp::Ordering;
use std::fmt::Debug;

/// The top-down red black schedule.
///
/// Insertions split every node with two red children on the way down, so the new red leaf can
/// always be attached with at most one rotation at the bottom. Erasures push a red node down
/// along the search path, so the node finally spliced out is red (or the root) and no upward pass
/// is needed.
pub struct TopDown;

impl Balancer for TopDown {
    type Meta = Color;

    const SIZE_GUIDED: bool = true;

    fn initial_meta() -> Color {
        Color::Red
    }

    fn insert<K: Ord>(tree: &mut Tree<K, Color>, key: K) -> Result<NodeId, (NodeId, K)> {
        insert(tree, key)
    }

    fn erase_by<K, F>(tree: &mut Tree<K, Color>, compare: F, replacement: Replacement) -> Option<K>
    where
        F: Fn(&K) -> Ordering,
    {
        erase(tree, compare, replacement)
    }

    fn audit<K: Debug>(tree: &Tree<K, Color>) -> check::Result<()> {
        super::audit(tree, false)
    }
}

// Repairs a red `node` below a red parent by rotating the grandparent down.
fn fix_red_pair<K>(tree: &mut Tree<K, Color>, node: NodeId) {
    let parent = tree.parent(node);
    let grandparent = tree.parent(parent);
    let side = tree
        .side_of(parent)
        .expect("Expected a red node to have a parent.");

    let top = if tree.side_of(node) == Some(side) {
        parent
    } else {
        tree.rotate(parent, side);
        tree.stats_mut().double_rotations += 1;
        node
    };
    tree.rotate(grandparent, side.opposite());
    tree[top].meta = Color::Black;
    tree[grandparent].meta = Color::Red;
}

pub(super) fn insert<K: Ord>(tree: &mut Tree<K, Color>, key: K) -> Result<NodeId, (NodeId, K)> {
    let mut curr = tree.root();
    if curr.is_nil() {
        return Ok(tree.attach(NodeId::NIL, Side::Left, key, Color::Black));
    }

    let ret = loop {
        let (left, right) = (tree.left(curr), tree.right(curr));
        if is_red(tree, left) && is_red(tree, right) {
            tree[curr].meta = Color::Red;
            tree[left].meta = Color::Black;
            tree[right].meta = Color::Black;
            tree.stats_mut().recolors += 1;
            if is_red(tree, tree.parent(curr)) {
                fix_red_pair(tree, curr);
            }
        }

        let ordering = key.cmp(&tree[curr].key);
        let side = match ordering {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => break Err((curr, key)),
        };
        let next = tree.child(curr, side);
        if next.is_nil() {
            let node = tree.attach(curr, side, key, Color::Red);
            if is_red(tree, curr) {
                fix_red_pair(tree, node);
            }
            break Ok(node);
        }
        curr = next;
    };

    let root = tree.root();
    tree[root].meta = Color::Black;
    ret
}

fn erase<K, F>(tree: &mut Tree<K, Color>, compare: F, replacement: Replacement) -> Option<K>
where
    F: Fn(&K) -> Ordering,
{
    let mut found = NodeId::NIL;
    let mut last = NodeId::NIL;
    let mut next = tree.root();

    while !next.is_nil() {
        let curr = next;
        last = curr;

        let ordering = compare(&tree[curr].key);
        let side = match ordering {
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
            Ordering::Equal => {
                found = curr;
                balancer::replacement_side::<K, TopDown>(tree, curr, replacement)
            },
        };

        if !is_red(tree, curr) && !is_red(tree, tree.child(curr, side)) {
            push_red_down(tree, curr, side);
        }
        next = tree.child(curr, side);
    }

    let ret = if found.is_nil() {
        None
    } else {
        tree.swap_keys(found, last);
        Some(tree.splice(last))
    };
    let root = tree.root();
    set_color(tree, root, Color::Black);
    ret
}

// Makes the black `node` red before the search descends from it toward `side`, borrowing the red
// from its other child, from its sibling, or from both children of its parent.
fn push_red_down<K>(tree: &mut Tree<K, Color>, node: NodeId, side: Side) {
    let other = tree.child(node, side.opposite());
    if is_red(tree, other) {
        tree.rotate(node, side);
        tree[node].meta = Color::Red;
        tree[other].meta = Color::Black;
        return;
    }

    let node_side = match tree.side_of(node) {
        Some(node_side) => node_side,
        None => return,
    };
    let parent = tree.parent(node);
    let sibling = tree.child(parent, node_side.opposite());
    if sibling.is_nil() {
        return;
    }

    let near = tree.child(sibling, node_side);
    let far = tree.child(sibling, node_side.opposite());
    if !is_red(tree, near) && !is_red(tree, far) {
        tree[parent].meta = Color::Black;
        tree[sibling].meta = Color::Red;
        tree[node].meta = Color::Red;
        tree.stats_mut().recolors += 1;
        return;
    }

    let top = if is_red(tree, near) {
        tree.rotate(sibling, node_side.opposite());
        tree.stats_mut().double_rotations += 1;
        tree.rotate(parent, node_side)
    } else {
        tree.rotate(parent, node_side)
    };
    tree[node].meta = Color::Red;
    tree[top].meta = Color::Red;
    let (left, right) = (tree.left(top), tree.right(top));
    set_color(tree, left, Color::Black);
    set_color(tree, right, Color::Black);
}
