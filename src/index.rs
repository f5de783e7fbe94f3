//! Index-label encoder.
//!
//! Normalizes heterogeneous per-tensor index lists into compact, dense
//! integer labels plus a parallel dimension table. The rest of the crate
//! never touches the caller's index-identity type again after this step.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::{OptimizeError, OptimizeResult};

/// Anything the caller uses to identify an index axis. The core only needs
/// equality and hashing; it never interprets the identity itself.
pub trait IndexId: Eq + Hash + Clone {}

impl<T: Eq + Hash + Clone> IndexId for T {}

/// A dense integer label assigned to a distinct index, starting at 0.
pub type Label = u32;

/// An ordered, duplicate-free (for well-formed input) sequence of labels
/// belonging to one tensor.
pub type LabelVec = SmallVec<[Label; 8]>;

/// Maps each assigned label to its (positive) dimension. Stable for the
/// duration of one optimization call.
#[derive(Debug, Clone, Default)]
pub struct DimTable {
    dims: Vec<u64>,
}

impl DimTable {
    /// The dimension registered for `label`, or `None` if it was never
    /// assigned by the encoder that built this table.
    pub fn get(&self, label: Label) -> Option<u64> {
        self.dims.get(label as usize).copied()
    }

    /// Number of distinct labels in the table.
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }
}

/// Output of the encoder: one label vector per input tensor plus the
/// dimension table shared by all of them.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub labels: Vec<LabelVec>,
    pub dims: DimTable,
}

/// Encodes N per-tensor index lists into dense labels.
///
/// Labels are assigned in first-seen order while scanning tensors
/// `0..N` and, within each tensor, left-to-right. Fails with
/// [`OptimizeError::InvalidInput`] if any index reports a non-positive
/// dimension.
pub fn encode<T: IndexId>(tensors: &[Vec<(T, i64)>]) -> OptimizeResult<Encoded> {
    let mut seen: HashMap<T, Label> = HashMap::new();
    let mut dims: Vec<u64> = Vec::new();
    let mut labels: Vec<LabelVec> = Vec::with_capacity(tensors.len());

    for tensor in tensors {
        let mut tensor_labels = LabelVec::with_capacity(tensor.len());
        for (id, dim) in tensor {
            if *dim <= 0 {
                return Err(OptimizeError::invalid_input(alloc::format!(
                    "index reports non-positive dimension {dim}"
                )));
            }
            let label = *seen.entry(id.clone()).or_insert_with(|| {
                let next = dims.len() as Label;
                dims.push(*dim as u64);
                next
            });
            tensor_labels.push(label);
        }
        labels.push(tensor_labels);
    }

    Ok(Encoded {
        labels,
        dims: DimTable { dims },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn first_seen_order_assigns_dense_labels() {
        let tensors = vec![
            vec![("a", 2i64), ("b", 10)],
            vec![("b", 10), ("c", 10)],
            vec![("c", 10), ("d", 2)],
        ];

        let encoded = encode(&tensors).unwrap();
        assert_eq!(encoded.labels[0].as_slice(), &[0, 1]);
        assert_eq!(encoded.labels[1].as_slice(), &[1, 2]);
        assert_eq!(encoded.labels[2].as_slice(), &[2, 3]);
        assert_eq!(encoded.dims.len(), 4);
        assert_eq!(encoded.dims.get(0), Some(2));
        assert_eq!(encoded.dims.get(1), Some(10));
        assert_eq!(encoded.dims.get(3), Some(2));
    }

    #[test]
    fn non_positive_dimension_is_rejected() {
        let tensors = vec![vec![("a", 0i64)]];
        let err = encode(&tensors).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidInput { .. }));

        let tensors = vec![vec![("a", -3i64)]];
        let err = encode(&tensors).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidInput { .. }));
    }

    #[test]
    fn repeated_index_reuses_the_same_label() {
        let tensors = vec![vec![("x", 4i64)], vec![("x", 4i64), ("y", 5)]];
        let encoded = encode(&tensors).unwrap();
        assert_eq!(encoded.labels[0][0], encoded.labels[1][0]);
        assert_eq!(encoded.dims.len(), 2);
    }
}
