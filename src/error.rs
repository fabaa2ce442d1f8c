//! Error taxonomy of the estimator.
//!
//! Every failure is reported synchronously as a value; the library never
//! panics on caller input that reaches a fallible operation. `insert_hash`
//! and `estimate` have no failure modes at all.

/// Errors returned by estimator construction, set algebra, and the
/// snapshot boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Register count rejected at construction: zero, not a power of two,
    /// or more registers than a 32-bit hash can index.
    #[error("number of registers {0} not a power of two in [1, 2^32]")]
    InvalidConfiguration(usize),

    /// Merge or intersect attempted between estimators of different sizes.
    /// The receiver is left unmodified.
    #[error("number of registers doesn't match: {left} != {right}")]
    IncompatibleEstimators { left: usize, right: usize },

    /// Encoding a snapshot to text failed; no output was produced.
    #[error("failed to encode estimator snapshot: {0}")]
    SerializationFailure(String),

    /// Decoding a snapshot from text failed; no estimator was constructed.
    #[error("failed to decode estimator snapshot: {0}")]
    DeserializationFailure(String),
}
