//! # contraction-order
//!
//! Contraction-order search for tensor networks: given a set of tensors
//! described only by their index labels and dimensions, finds a binary
//! contraction tree minimizing the total pairwise contraction cost.
//!
//! Two independent search strategies are provided:
//!
//! - [`depth_first`]: recursive branch-and-bound enumeration, with an
//!   optional pairwise-cost cache.
//! - [`breadth_first`]: the classical subset dynamic program, optimal for
//!   up to 64 input tensors.
//!
//! Both strategies agree on the optimal cost; they differ only in time and
//! memory behavior. Exactly three tensors are always solved by a dedicated
//! analytic optimizer regardless of which strategy is requested.
//!
//! This crate does not parse einsum notation and does not perform the
//! numerical contraction itself — it only decides the order in which
//! pairwise contractions should happen.
//!
//! ## Example
//!
//! ```
//! use contraction_order::depth_first;
//!
//! // Ring of four tensors sharing pairwise indices.
//! let tensors = vec![
//!     vec![("a", 10i64), ("b", 10)],
//!     vec![("b", 10), ("c", 10)],
//!     vec![("c", 10), ("d", 10)],
//!     vec![("d", 10), ("a", 10)],
//! ];
//! let (tree, cost) = depth_first(&tensors, false).unwrap();
//! assert_eq!(tree.leaves().len(), 4);
//! let _ = cost;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod api;
pub mod bitset;
pub mod breadth_first;
pub mod cost;
pub mod depth_first;
pub mod error;
pub mod index;
pub mod three;
pub mod tree;

pub use api::{breadth_first, depth_first};
pub use error::{OptimizeError, OptimizeResult};
pub use index::IndexId;
pub use tree::Tree;
