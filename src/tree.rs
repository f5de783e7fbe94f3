//! Contraction tree representation and the sequence-tree assembler.

use alloc::boxed::Box;
use alloc::vec::Vec;

/// A binary contraction tree. Leaves are 1-based input-tensor positions;
/// internal nodes pair two already-built subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Leaf(usize),
    Node(Box<Tree>, Box<Tree>),
}

impl Tree {
    pub fn node(left: Tree, right: Tree) -> Tree {
        Tree::Node(Box::new(left), Box::new(right))
    }

    /// The multiset of leaves, in tree-traversal order.
    pub fn leaves(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<usize>) {
        match self {
            Tree::Leaf(i) => out.push(*i),
            Tree::Node(l, r) => {
                l.collect_leaves(out);
                r.collect_leaves(out);
            }
        }
    }
}

/// Converts a pair sequence of length N-1 into a nested binary tree.
///
/// `pairs[k] = (a, b)` means "append the node formed by combining the
/// entries currently at positions `a` and `b` of the growing list"; the
/// growing list starts as `[Leaf(1), .., Leaf(N)]` and each combination is
/// appended to its end. Positions are absolute in this growing list, never
/// re-read once consumed, and correctness depends entirely on the caller
/// having produced positions that were valid at the moment each pair was
/// recorded.
pub fn assemble(n: usize, pairs: &[(usize, usize)]) -> Tree {
    let mut growing: Vec<Tree> = (1..=n).map(Tree::Leaf).collect();
    for &(a, b) in pairs {
        let node = Tree::node(growing[a].clone(), growing[b].clone());
        growing.push(node);
    }
    growing
        .pop()
        .expect("assemble requires at least one input tensor")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn single_leaf_has_no_pairs() {
        let tree = assemble(1, &[]);
        assert_eq!(tree, Tree::Leaf(1));
        assert_eq!(tree.leaves(), vec![1]);
    }

    #[test]
    fn chain_of_three_assembles_left_leaning() {
        // Contract position 0 (tensor 1) with position 1 (tensor 2) first,
        // then the result (position 3) with position 2 (tensor 3).
        let tree = assemble(3, &[(0, 1), (3, 2)]);
        assert_eq!(
            tree,
            Tree::node(Tree::node(Tree::Leaf(1), Tree::Leaf(2)), Tree::Leaf(3))
        );
        let mut leaves = tree.leaves();
        leaves.sort_unstable();
        assert_eq!(leaves, vec![1, 2, 3]);
    }

    #[test]
    fn ring_of_four_assembles_balanced() {
        let tree = assemble(4, &[(0, 1), (2, 3), (4, 5)]);
        assert_eq!(
            tree,
            Tree::node(
                Tree::node(Tree::Leaf(1), Tree::Leaf(2)),
                Tree::node(Tree::Leaf(3), Tree::Leaf(4))
            )
        );
    }
}
