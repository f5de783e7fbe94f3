//! Breadth-first constructive (subset-DP) optimizer.
//!
//! The classical optimal-contraction-tree dynamic program: for every
//! nonempty subset of the N input tensors, compute the optimal cost and
//! subtree by combining two disjoint subsets whose union is it, visiting
//! subsets in order of increasing size so every combination only ever
//! needs already-solved smaller subsets.

use core::cmp::Ordering;

use hashbrown::HashMap;

use crate::bitset::LabelBitset;
use crate::cost::pairwise_contract_bitset;
use crate::error::{OptimizeError, OptimizeResult};
use crate::index::{DimTable, LabelVec};
use crate::tree::Tree;

/// A subset of the N input tensors, one bit per tensor (bit `i` = tensor
/// `i`, 0-based). Supports up to 64 input tensors, far beyond the
/// practical range of this O(3^N) search.
type Subset = u64;

/// Ascending-element lexicographic order on two bitsets of equal
/// cardinality: compare their smallest elements, then their next-smallest,
/// and so on.
fn lex_cmp(a: Subset, b: Subset) -> Ordering {
    let (mut ia, mut ib) = (a, b);
    loop {
        match (ia == 0, ib == 0) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        let ea = ia.trailing_zeros();
        let eb = ib.trailing_zeros();
        if ea != eb {
            return ea.cmp(&eb);
        }
        ia &= ia - 1;
        ib &= ib - 1;
    }
}

/// Iterates all `n`-bit subsets with exactly `size` set bits, in ascending
/// numeric order, via the standard "Gosper's hack" submask trick (a
/// fixed-popcount generalization of the host crate's `proper_subsets`
/// submask enumeration).
fn subsets_of_size(n: u32, size: u32) -> impl Iterator<Item = Subset> {
    let limit: Subset = if n >= Subset::BITS { Subset::MAX } else { 1 << n };

    let mut next: Option<Subset> = if size > n {
        None
    } else if size == 0 {
        Some(0)
    } else {
        Some((1 << size) - 1)
    };

    core::iter::from_fn(move || {
        let current = next?;
        if current >= limit {
            next = None;
            return None;
        }

        next = if current == 0 {
            // `size == 0`: the empty set is the only subset.
            None
        } else {
            let c = current & current.wrapping_neg();
            let r = current + c;
            let candidate = (((current ^ r) >> 2) / c) | r;
            if candidate < limit {
                Some(candidate)
            } else {
                None
            }
        };

        Some(current)
    })
}

struct Tables {
    cost: HashMap<Subset, u64>,
    tree: HashMap<Subset, Tree>,
    inds: HashMap<Subset, LabelBitset>,
}

fn single_leaf(subset: Subset) -> usize {
    subset.trailing_zeros() as usize + 1
}

fn subtree(tables: &Tables, subset: Subset) -> Tree {
    if subset.count_ones() == 1 {
        Tree::Leaf(single_leaf(subset))
    } else {
        tables
            .tree
            .get(&subset)
            .expect("every combined subset visited by the main loop has a recorded subtree")
            .clone()
    }
}

/// Finds the optimal contraction order via the subset dynamic program.
pub fn breadth_first(dims: &DimTable, tensors: &[LabelVec]) -> OptimizeResult<(Tree, u64)> {
    let n = tensors.len();
    match n {
        0 => {
            return Err(OptimizeError::invalid_input(
                "breadth_first requires at least one tensor",
            ))
        }
        1 => return Ok((Tree::Leaf(1), 0)),
        2 => return Ok((Tree::node(Tree::Leaf(1), Tree::Leaf(2)), 0)),
        3 => return crate::three::optimize_three(dims, tensors),
        _ => {}
    }
    if n > Subset::BITS as usize {
        return Err(OptimizeError::invalid_input(alloc::format!(
            "breadth_first supports at most {} tensors",
            Subset::BITS
        )));
    }

    let n_u32 = n as u32;
    let mut tables = Tables {
        cost: HashMap::new(),
        tree: HashMap::new(),
        inds: HashMap::new(),
    };

    for (i, labels) in tensors.iter().enumerate() {
        let singleton: Subset = 1 << i;
        tables.cost.insert(singleton, 0);
        tables.inds.insert(singleton, LabelBitset::from_labels(labels));
    }

    for c in 2..=n_u32 {
        for d in 1..=(c / 2) {
            for a in subsets_of_size(n_u32, d) {
                for b in subsets_of_size(n_u32, c - d) {
                    if a & b != 0 {
                        continue;
                    }
                    if d == c - d && lex_cmp(b, a) == Ordering::Less {
                        continue;
                    }

                    let inds_a = tables
                        .inds
                        .get(&a)
                        .expect("every size-d subset was seeded or inserted by a smaller c");
                    let inds_b = tables
                        .inds
                        .get(&b)
                        .expect("every size-(c-d) subset was seeded or inserted by a smaller c");
                    let (result_inds, mut mu) = pairwise_contract_bitset(dims, inds_a, inds_b)?;

                    if a.count_ones() > 1 {
                        mu = mu
                            .checked_add(*tables.cost.get(&a).unwrap())
                            .ok_or(OptimizeError::CostOverflow)?;
                    }
                    if b.count_ones() > 1 {
                        mu = mu
                            .checked_add(*tables.cost.get(&b).unwrap())
                            .ok_or(OptimizeError::CostOverflow)?;
                    }

                    let union = a | b;
                    let better = match tables.cost.get(&union) {
                        None => true,
                        Some(&current) => mu < current,
                    };
                    if better {
                        let left = subtree(&tables, a);
                        let right = subtree(&tables, b);
                        tables.cost.insert(union, mu);
                        tables.tree.insert(union, Tree::node(left, right));
                        tables.inds.insert(union, result_inds);
                    }
                }
            }
        }
    }

    let full: Subset = if n_u32 == Subset::BITS { Subset::MAX } else { (1 << n_u32) - 1 };
    let cost = *tables
        .cost
        .get(&full)
        .ok_or_else(|| OptimizeError::internal("subset DP never reached the full tensor set"))?;
    let tree = tables
        .tree
        .get(&full)
        .expect("subset DP reached the full tensor set, so its subtree was recorded")
        .clone();
    Ok((tree, cost))
}
