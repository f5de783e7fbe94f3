//! Contraction-cost kernel.
//!
//! Given two operand index collections and a dimension table, computes the
//! resulting (uncontracted) index collection and the arithmetic cost of
//! the pairwise contraction. Both the label-vector and label-bitset
//! representations share the same cost formula and the same checked
//! multiplication path, so neither optimizer can observe overflow
//! differently from the other.

use alloc::vec::Vec;

use crate::bitset::LabelBitset;
use crate::error::{OptimizeError, OptimizeResult};
use crate::index::{DimTable, Label, LabelVec};
use crate::tree::Tree;

/// `(A ∪ B) \ (A ∩ B)`, preserving operand-A order first, then the
/// labels of operand B that weren't already in A. Order is otherwise
/// implementation-defined but stable given the same inputs.
///
/// Assumes each label appears at most once within a single operand;
/// behavior is unspecified (but will not panic) if that is violated.
pub fn symmetric_difference_vec(a: &LabelVec, b: &LabelVec) -> LabelVec {
    let mut result = LabelVec::new();
    for &label in a {
        if !b.contains(&label) {
            result.push(label);
        }
    }
    for &label in b {
        if !a.contains(&label) {
            result.push(label);
        }
    }
    result
}

/// `D(S)`: the product of dimensions of the labels in `S`. The empty
/// product is 1. Fails with [`OptimizeError::CostOverflow`] on
/// wraparound.
pub fn dim_product(dims: &DimTable, labels: &[Label]) -> OptimizeResult<u64> {
    let mut product: u64 = 1;
    for &label in labels {
        let d = dims.get(label).ok_or_else(|| {
            OptimizeError::invalid_input(alloc::format!("label {label} has no registered dimension"))
        })?;
        product = product
            .checked_mul(d)
            .ok_or(OptimizeError::CostOverflow)?;
    }
    Ok(product)
}

/// Floor of the integer square root of `n`.
pub fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    // Correct for floating-point rounding in either direction. `x` can land
    // as high as 2^32 here (the f64 estimate for n near u64::MAX rounds up),
    // so `x * x` must go through a checked path rather than the plain
    // operator to avoid overflowing on the very inputs this function is
    // supposed to handle.
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while x
        .checked_add(1)
        .and_then(|next| next.checked_mul(next))
        .map(|sq| sq <= n)
        .unwrap_or(false)
    {
        x += 1;
    }
    x
}

/// `cost(A, B) = floor(sqrt(D(A) * D(B) * D(R)))`, the standard count of
/// scalar multiplications for a pairwise contraction, where `R` is the
/// symmetric difference of `A` and `B`.
fn cost_from_dims(da: u64, db: u64, dr: u64) -> OptimizeResult<u64> {
    let product = da
        .checked_mul(db)
        .and_then(|x| x.checked_mul(dr))
        .ok_or(OptimizeError::CostOverflow)?;
    Ok(isqrt(product))
}

/// Contracts two tensors given in label-vector form. Returns the result's
/// label vector and the pairwise contraction cost.
pub fn pairwise_contract_vec(
    dims: &DimTable,
    a: &LabelVec,
    b: &LabelVec,
) -> OptimizeResult<(LabelVec, u64)> {
    let result = symmetric_difference_vec(a, b);
    let da = dim_product(dims, a)?;
    let db = dim_product(dims, b)?;
    let dr = dim_product(dims, &result)?;
    let cost = cost_from_dims(da, db, dr)?;
    Ok((result, cost))
}

/// Contracts two tensors given in label-bitset form. Returns the result's
/// label bitset and the pairwise contraction cost.
pub fn pairwise_contract_bitset(
    dims: &DimTable,
    a: &LabelBitset,
    b: &LabelBitset,
) -> OptimizeResult<(LabelBitset, u64)> {
    let result = a.symmetric_difference(b);
    let da = dim_product(dims, &a.to_label_vec())?;
    let db = dim_product(dims, &b.to_label_vec())?;
    let dr = dim_product(dims, &result.to_label_vec())?;
    let cost = cost_from_dims(da, db, dr)?;
    Ok((result, cost))
}

/// Walks a contraction tree bottom-up, re-deriving each pairwise cost from
/// the cost kernel, and returns the root's label vector together with the
/// total cost summed along the way. Used to independently cross-check a
/// returned tree's reported cost against the kernel it was built from.
///
/// `tensors[i]` is the label vector of the input tensor that `Tree::Leaf(i
/// + 1)` refers to. Note this recomputes the *actual* pairwise cost at
/// every node, including two-leaf ones; callers comparing against
/// `depth_first`/`breadth_first`'s reported cost for `N <= 2` must account
/// for those entry points' documented base case of reporting 0 instead.
pub fn evaluate_tree_cost(dims: &DimTable, tensors: &[LabelVec], tree: &Tree) -> OptimizeResult<(LabelVec, u64)> {
    match tree {
        Tree::Leaf(i) => {
            let labels = tensors.get(*i - 1).ok_or_else(|| {
                OptimizeError::invalid_input(alloc::format!("leaf {i} has no matching input tensor"))
            })?;
            Ok((labels.clone(), 0))
        }
        Tree::Node(left, right) => {
            let (left_labels, left_cost) = evaluate_tree_cost(dims, tensors, left)?;
            let (right_labels, right_cost) = evaluate_tree_cost(dims, tensors, right)?;
            let (result, pair_cost) = pairwise_contract_vec(dims, &left_labels, &right_labels)?;
            let total = left_cost
                .checked_add(right_cost)
                .and_then(|sum| sum.checked_add(pair_cost))
                .ok_or(OptimizeError::CostOverflow)?;
            Ok((result, total))
        }
    }
}
