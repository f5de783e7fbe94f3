//! Public entry points.
//!
//! Accepts tensors in raw index-identity form, runs them through the
//! encoder, and dispatches to the depth-first or breadth-first search.
//! This is the only layer that sees the caller's `IndexId` type; everything
//! downstream works on encoded labels.

use alloc::vec::Vec;

use crate::error::OptimizeResult;
use crate::index::{self, IndexId};
use crate::tree::Tree;

/// Finds a contraction order via depth-first branch-and-bound.
///
/// `tensors[i]` is the list of `(index identity, dimension)` pairs for
/// input tensor `i`, 1-based in the returned tree's leaves. `enable_caching`
/// turns on the pairwise-cost cache; it has no observable effect on the
/// result, only on runtime. For one or two tensors the trivial tree is
/// returned with cost 0. For exactly three tensors the analytic optimizer
/// is used regardless of `enable_caching`.
pub fn depth_first<T: IndexId>(
    tensors: &[Vec<(T, i64)>],
    enable_caching: bool,
) -> OptimizeResult<(Tree, u64)> {
    let encoded = index::encode(tensors)?;
    crate::depth_first::depth_first(&encoded.dims, &encoded.labels, enable_caching)
}

/// Finds a contraction order via the breadth-first subset dynamic program.
///
/// Same input convention as [`depth_first`]. Supports at most 64 input
/// tensors, since subsets are tracked as `u64` bitmasks.
pub fn breadth_first<T: IndexId>(tensors: &[Vec<(T, i64)>]) -> OptimizeResult<(Tree, u64)> {
    let encoded = index::encode(tensors)?;
    crate::breadth_first::breadth_first(&encoded.dims, &encoded.labels)
}
