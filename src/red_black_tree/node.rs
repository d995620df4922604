use crate::node::NodeId;
use crate::tree::Tree;

/// An enum representing the color of a node in a red black tree.
///
/// `DoubleBlack` only exists transiently while the bottom-up schedule repairs an erasure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
    DoubleBlack,
}

impl Color {
    pub fn flip(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
            Color::DoubleBlack => unreachable!(),
        }
    }
}

/// Returns the color of `node`. Absent children are black.
pub fn color<K>(tree: &Tree<K, Color>, node: NodeId) -> Color {
    if node.is_nil() {
        Color::Black
    } else {
        tree[node].meta
    }
}

pub fn is_red<K>(tree: &Tree<K, Color>, node: NodeId) -> bool {
    color(tree, node) == Color::Red
}

/// Colors `node` unless it is absent.
pub fn set_color<K>(tree: &mut Tree<K, Color>, node: NodeId, color: Color) {
    if !node.is_nil() {
        tree[node].meta = color;
    }
}

/// Flips the color of `node` and of both of its children.
pub fn flip_colors<K>(tree: &mut Tree<K, Color>, node: NodeId) {
    let (left, right) = (tree.left(node), tree.right(node));
    for id in &[node, left, right] {
        if !id.is_nil() {
            let flipped = tree[*id].meta.flip();
            tree[*id].meta = flipped;
        }
    }
    tree.stats_mut().recolors += 1;
}

#[cfg(test)]
mod tests {
    use super::{color, flip_colors, is_red, Color};
    use crate::config::Pooling;
    use crate::node::{NodeId, Side};
    use crate::tree::Tree;

    #[test]
    fn test_nil_is_black() {
        let tree: Tree<u32, Color> = Tree::new(Pooling::Lazy, false);
        assert_eq!(color(&tree, NodeId::NIL), Color::Black);
        assert!(!is_red(&tree, NodeId::NIL));
    }

    #[test]
    fn test_flip_colors() {
        let mut tree = Tree::new(Pooling::Lazy, false);
        let root = tree.attach(NodeId::NIL, Side::Left, 2, Color::Black);
        let left = tree.attach(root, Side::Left, 1, Color::Red);
        flip_colors(&mut tree, root);
        assert_eq!(tree[root].meta, Color::Red);
        assert_eq!(tree[left].meta, Color::Black);
        assert_eq!(tree.stats().recolors, 1);
    }
}
