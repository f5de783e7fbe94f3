//! Depth-first constructive optimizer.
//!
//! Recursive branch-and-bound enumeration of all contraction orderings,
//! with an optional pairwise-cost cache. Returns a globally optimal tree.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::cost::pairwise_contract_vec;
use crate::error::{OptimizeError, OptimizeResult};
use crate::index::{DimTable, LabelVec};
use crate::tree::{assemble, Tree};

/// Key for the optional pairwise-cost cache: the two operand label
/// vectors, exactly as given, with no canonicalization. Symmetric pairs
/// `(A, B)` and `(B, A)` are therefore distinct cache entries.
type CacheKey = (LabelVec, LabelVec);

struct Search<'a> {
    dims: &'a DimTable,
    cache: Option<HashMap<CacheKey, (LabelVec, u64)>>,
    best_cost: Option<u64>,
    best_seq: Vec<(usize, usize)>,
}

impl<'a> Search<'a> {
    fn pairwise(&mut self, a: &LabelVec, b: &LabelVec) -> OptimizeResult<(LabelVec, u64)> {
        if let Some(cache) = &mut self.cache {
            let key = (a.clone(), b.clone());
            if let Some(hit) = cache.get(&key) {
                return Ok(hit.clone());
            }
            let computed = pairwise_contract_vec(self.dims, a, b)?;
            cache.insert(key, computed.clone());
            Ok(computed)
        } else {
            pairwise_contract_vec(self.dims, a, b)
        }
    }

    fn search(
        &mut self,
        working: &mut Vec<LabelVec>,
        remaining: &mut Vec<usize>,
        seq: &mut Vec<(usize, usize)>,
        running_cost: u64,
    ) -> OptimizeResult<()> {
        if remaining.len() == 1 {
            if let Some(best) = self.best_cost {
                if running_cost > best {
                    return Err(OptimizeError::internal(
                        "depth-first reached a leaf whose running cost exceeds the best known cost, \
                         violating the pruning guarantee",
                    ));
                }
            }
            if self.best_cost.map_or(true, |best| running_cost < best) {
                self.best_cost = Some(running_cost);
                self.best_seq = seq.clone();
            }
            return Ok(());
        }

        let n = remaining.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let pos_i = remaining[i];
                let pos_j = remaining[j];
                let (result, pair_cost) = self.pairwise(&working[pos_i], &working[pos_j])?;

                let new_cost = match running_cost.checked_add(pair_cost) {
                    Some(c) => c,
                    None => return Err(OptimizeError::CostOverflow),
                };

                if let Some(best) = self.best_cost {
                    if new_cost >= best {
                        // Branch cannot possibly improve on the best
                        // known complete order.
                        continue;
                    }
                }

                working.push(result);
                let new_pos = working.len() - 1;
                seq.push((pos_i, pos_j));

                let mut new_remaining: Vec<usize> = remaining
                    .iter()
                    .copied()
                    .enumerate()
                    .filter(|&(k, _)| k != i && k != j)
                    .map(|(_, p)| p)
                    .collect();
                new_remaining.push(new_pos);

                self.search(working, &mut new_remaining, seq, new_cost)?;

                seq.pop();
                working.pop();
            }
        }

        Ok(())
    }
}

/// Finds the optimal contraction order via depth-first branch-and-bound.
///
/// `enable_caching` turns on the pairwise-cost cache; it has no observable
/// effect on the result, only on runtime.
pub fn depth_first(
    dims: &DimTable,
    tensors: &[LabelVec],
    enable_caching: bool,
) -> OptimizeResult<(Tree, u64)> {
    let n = tensors.len();
    match n {
        0 => {
            return Err(OptimizeError::invalid_input(
                "depth_first requires at least one tensor",
            ))
        }
        1 => return Ok((Tree::Leaf(1), 0)),
        2 => return Ok((Tree::node(Tree::Leaf(1), Tree::Leaf(2)), 0)),
        3 => return crate::three::optimize_three(dims, tensors),
        _ => {}
    }

    let mut working: Vec<LabelVec> = tensors.to_vec();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut seq: Vec<(usize, usize)> = Vec::with_capacity(n - 1);

    let mut search = Search {
        dims,
        cache: if enable_caching {
            Some(HashMap::new())
        } else {
            None
        },
        best_cost: None,
        best_seq: Vec::new(),
    };

    search.search(&mut working, &mut remaining, &mut seq, 0)?;

    let best_cost = search.best_cost.ok_or_else(|| {
        OptimizeError::internal("depth-first search produced no complete contraction order")
    })?;
    let tree = assemble(n, &search.best_seq);
    Ok((tree, best_cost))
}
