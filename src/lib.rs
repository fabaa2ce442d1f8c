//! `hyperloglog-estimator` is a Rust crate for estimating the number of distinct elements in large multisets using a fixed, small amount of memory.
//!
//! The estimator is a classic HyperLogLog over caller-supplied 32-bit hashes: one byte per register,
//! bias-corrected harmonic-mean estimation with small/large range corrections, mergeable across
//! independently maintained instances (union), with an inclusion-exclusion intersection estimate
//! and a flat JSON snapshot format for persistence and transfer.
mod error;
pub mod estimator;
mod serde;

pub use crate::error::Error;
pub use crate::estimator::Estimator;
pub use crate::serde::Snapshot;
