//! Error types for contraction-order optimization.

use alloc::string::String;

/// Errors that can occur while encoding tensors or searching for a
/// contraction order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum OptimizeError {
    /// An index reported a non-positive dimension, or a leaf position was
    /// out of range.
    #[cfg_attr(feature = "std", error("invalid input: {message}"))]
    InvalidInput { message: String },

    /// The product of dimension sizes used to compute a pairwise
    /// contraction cost overflowed the platform integer range.
    #[cfg_attr(
        feature = "std",
        error("cost overflow while computing a pairwise contraction cost")
    )]
    CostOverflow,

    /// A search invariant that the algorithm relies on for correctness did
    /// not hold. Indicates a bug in the optimizer, not bad input.
    #[cfg_attr(feature = "std", error("internal invariant violated: {message}"))]
    InternalInvariant { message: String },
}

impl OptimizeError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalInvariant {
            message: message.into(),
        }
    }
}

/// Result type for contraction-order optimization.
pub type OptimizeResult<T> = core::result::Result<T, OptimizeError>;
