use super::node::{flip_colors, is_red, set_color, Color};
use crate::balancer::Balancer;
use crate::check;
use crate::config::Replacement;
use crate::node::{NodeId, Side};
use crate::tree::Tree;
use std::cmp::Ordering;
use std::fmt::Debug;

/// The left-leaning red black schedule.
///
/// Red links only ever lean left, which makes every node correspond to a 2-node or a 3-node of a
/// 2-3 tree. The erasure of a node with two children always takes the successor, regardless of
/// the configured `Replacement`.
pub struct LeftLeaning;

impl Balancer for LeftLeaning {
    type Meta = Color;

    fn initial_meta() -> Color {
        Color::Red
    }

    fn insert<K: Ord>(tree: &mut Tree<K, Color>, key: K) -> Result<NodeId, (NodeId, K)> {
        let root = tree.root();
        let ret = if root.is_nil() {
            Ok(tree.attach(NodeId::NIL, Side::Left, key, Color::Red))
        } else {
            insert(tree, root, key)
        };
        let root = tree.root();
        tree[root].meta = Color::Black;
        ret
    }

    fn erase_by<K, F>(tree: &mut Tree<K, Color>, compare: F, _replacement: Replacement) -> Option<K>
    where
        F: Fn(&K) -> Ordering,
    {
        if tree.search(&compare).is_nil() {
            return None;
        }

        let root = tree.root();
        if !is_red(tree, tree.left(root)) && !is_red(tree, tree.right(root)) {
            tree[root].meta = Color::Red;
        }
        let ret = erase(tree, root, &compare);
        let root = tree.root();
        set_color(tree, root, Color::Black);
        Some(ret)
    }

    fn audit<K: Debug>(tree: &Tree<K, Color>) -> check::Result<()> {
        super::audit(tree, true)
    }
}

// Rotates `node` down toward `side`. The promoted child takes over the color of `node`, which
// turns red.
fn rotate<K>(tree: &mut Tree<K, Color>, node: NodeId, side: Side) -> NodeId {
    let child = tree.rotate(node, side);
    tree[child].meta = tree[node].meta;
    tree[node].meta = Color::Red;
    child
}

// Restores the left-leaning shape of `node` after an insertion below it.
fn fix_up<K>(tree: &mut Tree<K, Color>, node: NodeId) {
    let mut node = node;
    if is_red(tree, tree.right(node)) && !is_red(tree, tree.left(node)) {
        node = rotate(tree, node, Side::Left);
    }
    split(tree, node);
}

// Restores the left-leaning shape of `node` after an erasure below it, where both of its links
// may be red.
fn balance<K>(tree: &mut Tree<K, Color>, node: NodeId) {
    let mut node = node;
    if is_red(tree, tree.right(node)) {
        node = rotate(tree, node, Side::Left);
    }
    split(tree, node);
}

fn split<K>(tree: &mut Tree<K, Color>, node: NodeId) {
    let mut node = node;
    let left = tree.left(node);
    if is_red(tree, left) && is_red(tree, tree.left(left)) {
        node = rotate(tree, node, Side::Right);
    }
    if is_red(tree, tree.left(node)) && is_red(tree, tree.right(node)) {
        flip_colors(tree, node);
    }
}

// Makes the left child of `node` or one of its children red before descending left.
fn shift_left<K>(tree: &mut Tree<K, Color>, node: NodeId) -> NodeId {
    let mut node = node;
    flip_colors(tree, node);
    let right = tree.right(node);
    if is_red(tree, tree.left(right)) {
        rotate(tree, right, Side::Right);
        node = rotate(tree, node, Side::Left);
        tree.stats_mut().double_rotations += 1;
        flip_colors(tree, node);
    }
    node
}

// Makes the right child of `node` or one of its children red before descending right.
fn shift_right<K>(tree: &mut Tree<K, Color>, node: NodeId) -> NodeId {
    let mut node = node;
    flip_colors(tree, node);
    if is_red(tree, tree.left(tree.left(node))) {
        node = rotate(tree, node, Side::Right);
        flip_colors(tree, node);
    }
    node
}

fn insert<K: Ord>(tree: &mut Tree<K, Color>, node: NodeId, key: K) -> Result<NodeId, (NodeId, K)> {
    let ordering = key.cmp(&tree[node].key);
    let side = match ordering {
        Ordering::Less => Side::Left,
        Ordering::Greater => Side::Right,
        Ordering::Equal => return Err((node, key)),
    };
    let child = tree.child(node, side);
    let new_node = if child.is_nil() {
        tree.attach(node, side, key, Color::Red)
    } else {
        insert(tree, child, key)?
    };
    fix_up(tree, node);
    Ok(new_node)
}

fn erase_min<K>(tree: &mut Tree<K, Color>, node: NodeId) -> K {
    let mut node = node;
    if tree.left(node).is_nil() {
        return tree.splice(node);
    }
    let left = tree.left(node);
    if !is_red(tree, left) && !is_red(tree, tree.left(left)) {
        node = shift_left(tree, node);
    }
    let left = tree.left(node);
    let ret = erase_min(tree, left);
    balance(tree, node);
    ret
}

// The key must be present in the subtree rooted at `node`.
fn erase<K, F>(tree: &mut Tree<K, Color>, node: NodeId, compare: &F) -> K
where
    F: Fn(&K) -> Ordering,
{
    let mut node = node;
    if compare(&tree[node].key) == Ordering::Less {
        let left = tree.left(node);
        if !is_red(tree, left) && !is_red(tree, tree.left(left)) {
            node = shift_left(tree, node);
        }
        let left = tree.left(node);
        let ret = erase(tree, left, compare);
        balance(tree, node);
        return ret;
    }

    if is_red(tree, tree.left(node)) {
        node = rotate(tree, node, Side::Right);
    }
    let found = compare(&tree[node].key) == Ordering::Equal;
    if found && tree.right(node).is_nil() {
        return tree.splice(node);
    }
    let right = tree.right(node);
    if !is_red(tree, right) && !is_red(tree, tree.left(right)) {
        node = shift_right(tree, node);
    }
    let ret = if compare(&tree[node].key) == Ordering::Equal {
        let right = tree.right(node);
        let min = tree.extreme(right, Side::Left);
        tree.swap_keys(node, min);
        erase_min(tree, right)
    } else {
        let right = tree.right(node);
        erase(tree, right, compare)
    };
    balance(tree, node);
    ret
}

#[cfg(test)]
mod tests {
    use super::LeftLeaning;
    use crate::balancer::Balancer;
    use crate::check;
    use crate::config::{Pooling, Replacement};
    use crate::red_black_tree::Color;
    use crate::tree::Tree;

    fn tree_of(keys: &[u32]) -> Tree<u32, Color> {
        let mut tree = Tree::new(Pooling::Lazy, false);
        for key in keys {
            assert!(LeftLeaning::insert(&mut tree, *key).is_ok());
            assert_eq!(check::check::<u32, LeftLeaning>(&tree), Ok(()));
        }
        tree
    }

    #[test]
    fn test_insert_leans_left() {
        let tree = tree_of(&[1, 2]);
        assert_eq!(tree[tree.root()].key, 2);
        assert_eq!(tree[tree.left(tree.root())].meta, Color::Red);
        assert_eq!(tree.stats().left_rotations, 1);
    }

    #[test]
    fn test_insert_descending() {
        let tree = tree_of(&(0..64).rev().collect::<Vec<u32>>());
        assert_eq!(tree.len(), 64);
    }

    #[test]
    fn test_erase() {
        let mut tree = tree_of(&(0..32).collect::<Vec<u32>>());
        for key in (0..32).filter(|key| key % 2 == 1) {
            assert_eq!(LeftLeaning::erase(&mut tree, &key, Replacement::Predecessor), Some(key));
            assert_eq!(check::check::<u32, LeftLeaning>(&tree), Ok(()));
        }
        assert_eq!(tree.len(), 16);
        assert_eq!(tree.min(), Some(&0));
        assert_eq!(tree.max(), Some(&30));
    }

    #[test]
    fn test_erase_missing_keeps_shape() {
        let mut tree = tree_of(&[2, 1, 3]);
        let stats = *tree.stats();
        assert_eq!(LeftLeaning::erase(&mut tree, &7, Replacement::Successor), None);
        assert_eq!(*tree.stats(), stats);
        assert_eq!(check::check::<u32, LeftLeaning>(&tree), Ok(()));
    }

    #[test]
    fn test_erase_to_empty() {
        let mut tree = tree_of(&[2, 1, 3, 0]);
        for key in &[2, 0, 3, 1] {
            assert_eq!(LeftLeaning::erase(&mut tree, key, Replacement::Successor), Some(*key));
            assert_eq!(check::check::<u32, LeftLeaning>(&tree), Ok(()));
        }
        assert!(tree.root().is_nil());
    }
}
