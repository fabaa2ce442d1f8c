//! Snapshot (de)serialization for [`Estimator`].
//!
//! The full estimator state travels as a four-field structure with
//! one-letter keys — `M` (register count), `B` (index bits), `A` (bias
//! constant), `R` (register bytes) — encoded as JSON text. The shape and
//! key names are the interchange contract shared with snapshots already in
//! the wild, so no version field is added.
//!
//! Decoding is deliberately lenient: fields are applied exactly as encoded,
//! with no re-validation of the construction invariants. A snapshot whose
//! `M` is not a power of two (for instance one produced by a foreign
//! implementation) still loads and estimates; a snapshot whose `B` or `R`
//! length disagrees with `M` yields an estimator whose update path can
//! panic on out-of-bounds register indices. [`Estimator::new`] remains the
//! validating entry point; tightening decode would be a visible contract
//! change.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::estimator::Estimator;

/// Plain-data form of an estimator's full state, suitable for persistence
/// or transfer between processes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of registers.
    #[serde(rename = "M")]
    pub register_count: usize,
    /// Number of top hash bits used for register selection.
    #[serde(rename = "B")]
    pub index_bits: u32,
    /// Bias correction constant.
    #[serde(rename = "A")]
    pub bias: f64,
    /// Register contents, one entry per register in index order.
    #[serde(rename = "R")]
    pub registers: Vec<u8>,
}

impl Estimator {
    /// Capture the full estimator state as a [`Snapshot`]. Pure read.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            register_count: self.register_count(),
            index_bits: self.index_bits(),
            bias: self.bias(),
            registers: self.registers().to_vec(),
        }
    }

    /// Rebuild an estimator from a [`Snapshot`], applying every field as
    /// captured.
    ///
    /// No invariant is re-validated (see the module docs for what lenient
    /// decode implies); the snapshot is trusted the way the serialized
    /// format always has been.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Estimator::from_parts(
            snapshot.register_count,
            snapshot.index_bits,
            snapshot.bias,
            snapshot.registers,
        )
    }

    /// Encode the full estimator state as JSON text.
    ///
    /// Fails with [`Error::SerializationFailure`] if the encoder reports an
    /// error, in which case no output is produced.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| Error::SerializationFailure(e.to_string()))
    }

    /// Decode an estimator from JSON text produced by
    /// [`Estimator::to_json`] (or any writer of the same four-field shape).
    ///
    /// Input that does not parse into that shape fails with
    /// [`Error::DeserializationFailure`] and constructs nothing. Input that
    /// parses is applied leniently; see the module docs.
    pub fn from_json(input: &str) -> Result<Self, Error> {
        serde_json::from_str(input).map_err(|e| Error::DeserializationFailure(e.to_string()))
    }
}

impl Serialize for Estimator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.snapshot().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Estimator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Snapshot::deserialize(deserializer).map(Estimator::from_snapshot)
    }
}
