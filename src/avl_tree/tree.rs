use crate::balancer::{self, Balancer};
use crate::check::{self, describe, Violation};
use crate::config::Replacement;
use crate::node::{NodeId, Side};
use crate::tree::Tree;
use std::cmp::{self, Ordering};
use std::fmt::Debug;

/// The avl balancing schedule. Node metadata is the balance factor.
pub struct Avl;

impl Balancer for Avl {
    type Meta = i8;

    fn initial_meta() -> i8 {
        0
    }

    fn insert<K: Ord>(tree: &mut Tree<K, i8>, key: K) -> Result<NodeId, (NodeId, K)> {
        let root = tree.root();
        if root.is_nil() {
            return Ok(tree.attach(NodeId::NIL, Side::Left, key, 0));
        }
        insert(tree, root, key).map(|(node, _)| node)
    }

    fn erase_by<K, F>(tree: &mut Tree<K, i8>, compare: F, replacement: Replacement) -> Option<K>
    where
        F: Fn(&K) -> Ordering,
    {
        let root = tree.root();
        if root.is_nil() {
            return None;
        }
        erase(tree, root, &compare, replacement).map(|(key, _)| key)
    }

    // Taking the replacement from the taller side cannot shrink the shorter one further.
    fn preferred_side<K>(tree: &Tree<K, i8>, node: NodeId) -> Side {
        if tree[node].meta < 0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn audit<K: Debug>(tree: &Tree<K, i8>) -> check::Result<()> {
        height(tree, tree.root()).map(|_| ())
    }
}

fn weight(side: Side) -> i8 {
    match side {
        Side::Left => -1,
        Side::Right => 1,
    }
}

// Rotates the heavy child `child` of `node` and its inner grandchild above both of them, then
// derives the three new balance factors from the grandchild's old one.
fn rotate_double<K>(tree: &mut Tree<K, i8>, node: NodeId, heavy: Side) {
    let lean = weight(heavy);
    let child = tree.child(node, heavy);
    let grandchild = tree.child(child, heavy.opposite());
    tree.rotate(child, heavy);
    tree.rotate(node, heavy.opposite());

    let balance = tree[grandchild].meta;
    tree[node].meta = if balance == lean { -lean } else { 0 };
    tree[child].meta = if balance == -lean { lean } else { 0 };
    tree[grandchild].meta = 0;
    tree.stats_mut().double_rotations += 1;
}

// Called when the `side` subtree of `node` grew by one level. Returns `true` if the subtree
// rooted where `node` was also grew.
fn balance_insert<K>(tree: &mut Tree<K, i8>, node: NodeId, side: Side) -> bool {
    let lean = weight(side);
    let balance = tree[node].meta;
    if balance == -lean {
        tree[node].meta = 0;
        return false;
    }
    if balance == 0 {
        tree[node].meta = lean;
        return true;
    }

    let child = tree.child(node, side);
    if tree[child].meta == lean {
        tree.rotate(node, side.opposite());
        tree[node].meta = 0;
        tree[child].meta = 0;
    } else {
        rotate_double(tree, node, side);
    }
    false
}

// Called when the `side` subtree of `node` shrank by one level. Returns `true` if the subtree
// rooted where `node` was also shrank.
fn balance_erase<K>(tree: &mut Tree<K, i8>, node: NodeId, side: Side) -> bool {
    let heavy = side.opposite();
    let lean = weight(heavy);
    let balance = tree[node].meta;
    if balance == -lean {
        tree[node].meta = 0;
        return true;
    }
    if balance == 0 {
        tree[node].meta = lean;
        return false;
    }

    let child = tree.child(node, heavy);
    let child_balance = tree[child].meta;
    if child_balance == -lean {
        rotate_double(tree, node, heavy);
        return true;
    }

    tree.rotate(node, side);
    if child_balance == 0 {
        tree[node].meta = lean;
        tree[child].meta = -lean;
        false
    } else {
        tree[node].meta = 0;
        tree[child].meta = 0;
        true
    }
}

// Returns the new node (or the one holding an equal key) and whether the subtree rooted at
// `node` grew.
fn insert<K: Ord>(
    tree: &mut Tree<K, i8>,
    node: NodeId,
    key: K,
) -> Result<(NodeId, bool), (NodeId, K)> {
    let ordering = key.cmp(&tree[node].key);
    let side = match ordering {
        Ordering::Less => Side::Left,
        Ordering::Greater => Side::Right,
        Ordering::Equal => return Err((node, key)),
    };
    let child = tree.child(node, side);
    let (new_node, grew) = if child.is_nil() {
        (tree.attach(node, side, key, 0), true)
    } else {
        insert(tree, child, key)?
    };
    Ok((new_node, grew && balance_insert(tree, node, side)))
}

// Returns the erased key and whether the subtree rooted at `node` shrank.
fn erase<K, F>(
    tree: &mut Tree<K, i8>,
    node: NodeId,
    compare: &F,
    replacement: Replacement,
) -> Option<(K, bool)>
where
    F: Fn(&K) -> Ordering,
{
    let ordering = compare(&tree[node].key);
    let side = match ordering {
        Ordering::Less => Side::Left,
        Ordering::Greater => Side::Right,
        Ordering::Equal => {
            if tree.left(node).is_nil() || tree.right(node).is_nil() {
                return Some((tree.splice(node), true));
            }
            let side = balancer::replacement_side::<K, Avl>(tree, node, replacement);
            let subtree = tree.child(node, side);
            let (removed, shrank) = erase_extreme(tree, subtree, side.opposite(), node);
            return Some((removed, shrank && balance_erase(tree, node, side)));
        },
    };
    let child = tree.child(node, side);
    if child.is_nil() {
        return None;
    }
    let (removed, shrank) = erase(tree, child, compare, replacement)?;
    Some((removed, shrank && balance_erase(tree, node, side)))
}

// Walks from `node` toward `side` to the extreme node of the subtree, moves its key into
// `target` and splices it out. Returns the key that `target` held and whether the subtree rooted
// at `node` shrank.
fn erase_extreme<K>(tree: &mut Tree<K, i8>, node: NodeId, side: Side, target: NodeId) -> (K, bool) {
    let next = tree.child(node, side);
    if next.is_nil() {
        tree.swap_keys(target, node);
        return (tree.splice(node), true);
    }
    let (removed, shrank) = erase_extreme(tree, next, side, target);
    (removed, shrank && balance_erase(tree, node, side))
}

fn height<K: Debug>(tree: &Tree<K, i8>, node: NodeId) -> check::Result<i64> {
    if node.is_nil() {
        return Ok(0);
    }
    let left = height(tree, tree.left(node))?;
    let right = height(tree, tree.right(node))?;
    let balance = tree[node].meta;
    if balance < -1 || balance > 1 {
        return Err(Violation::BalanceRange {
            key: describe(&tree[node].key),
            balance,
        });
    }
    if right - left != i64::from(balance) {
        return Err(Violation::BalanceHeight {
            key: describe(&tree[node].key),
            balance,
            actual: right - left,
        });
    }
    Ok(cmp::max(left, right) + 1)
}
