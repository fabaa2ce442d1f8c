//! Fixed-memory estimator for the number of distinct elements in a multiset.
//!
//! The estimator keeps `M` one-byte registers, where `M` is a caller-chosen
//! power of two. Each observed element arrives as a 32-bit hash: the top
//! `B = log2(M)` bits select a register, the remaining `32 - B` bits are
//! scanned for their leftmost set bit, and the register keeps the maximum
//! rank ever observed. The cardinality estimate is a bias-corrected harmonic
//! mean over the registers, with a linear-counting estimator at the low end
//! and a hash-space saturation correction at the high end.
//!
//! Expected relative error is `1.04 / sqrt(M)`:
//!
//! - M = 64: 64 bytes, ~13% error
//! - M = 1024: 1 KiB, ~3.25% error
//! - M = 16384: 16 KiB, ~0.81% error
//!
//! Producing the 32-bit hashes is the caller's job; any hasher with good
//! uniformity and avalanche behavior works. All operations are synchronous
//! in-memory transformations; wrap an instance in a lock to share it across
//! threads.

use std::fmt::{Debug, Formatter};

use crate::error::Error;

/// Size of the 32-bit hash space as a float, used by the large-range
/// correction when the raw estimate approaches hash saturation.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Distinct-count estimator over pre-hashed 32-bit values.
///
/// # Example
///
/// ```
/// use hyperloglog_estimator::Estimator;
///
/// let mut estimator = Estimator::new(1024)?;
/// for hash in [0x1f2e3d4c_u32, 0xdeadbeef, 0x1f2e3d4c] {
///     estimator.insert_hash(hash);
/// }
/// assert_eq!(estimator.estimate(), 2);
/// # Ok::<(), hyperloglog_estimator::Error>(())
/// ```
#[derive(Clone, PartialEq)]
pub struct Estimator {
    /// Number of registers `M`; power of two for the instance's lifetime.
    register_count: usize,
    /// Number of top hash bits used for register selection, `log2(M)`.
    index_bits: u32,
    /// Bias correction constant `alpha(M)`.
    bias: f64,
    /// One byte per register, each holding the maximum observed rank.
    registers: Vec<u8>,
}

impl Estimator {
    /// Create a new estimator with `register_count` registers.
    ///
    /// More registers lower the estimation error at the cost of memory:
    /// each register is one byte, and the expected relative error is
    /// `1.04 / sqrt(register_count)`.
    ///
    /// Fails with [`Error::InvalidConfiguration`] unless `register_count`
    /// is a power of two that a 32-bit hash can index (at most `2^32`).
    pub fn new(register_count: usize) -> Result<Self, Error> {
        if register_count == 0 || register_count & (register_count - 1) != 0 {
            return Err(Error::InvalidConfiguration(register_count));
        }
        // Exact log2 for powers of two.
        let index_bits = register_count.trailing_zeros();
        if index_bits > 32 {
            return Err(Error::InvalidConfiguration(register_count));
        }
        Ok(Self {
            register_count,
            index_bits,
            bias: alpha(register_count),
            registers: vec![0; register_count],
        })
    }

    /// Zero every register in place, returning the estimator to its freshly
    /// constructed state. Size and derived constants are kept.
    pub fn reset(&mut self) {
        self.registers.fill(0);
    }

    /// Record one observed element, given its 32-bit hash.
    ///
    /// The update is a pointwise maximum, so inserting the same hash again
    /// is a no-op and insertion order never changes the register state.
    #[inline]
    pub fn insert_hash(&mut self, hash: u32) {
        let b = self.index_bits;
        // Top `b` bits select the register. Shifts run in u64 so the
        // degenerate single-register estimator (b = 0) stays well-defined.
        let index = (u64::from(hash) >> (32 - b)) as usize;
        // Remaining bits, left-aligned into a 32-bit word, carry the rank.
        let remainder = (u64::from(hash) << b) as u32;
        let rank = rank(remainder, 32 - b);
        if rank > self.registers[index] {
            self.registers[index] = rank;
        }
    }

    /// Return the estimated number of distinct elements observed.
    ///
    /// Pure read of the register state: repeated calls without intervening
    /// mutation return the same value.
    pub fn estimate(&self) -> u64 {
        let m = self.register_count as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|&rank| 2f64.powi(-i32::from(rank)))
            .sum();
        let mut estimate = self.bias * m * m / sum;

        if estimate <= 2.5 * m {
            // Small range: while empty registers remain, linear counting
            // over the zero-register count is the better estimator.
            let zeros = self.registers.iter().filter(|&&rank| rank == 0).count();
            if zeros > 0 {
                estimate = m * (m / zeros as f64).ln();
            }
        } else if estimate > TWO_POW_32 / 30.0 {
            // Large range: correct for 32-bit hash space saturation.
            estimate = -TWO_POW_32 * (1.0 - estimate / TWO_POW_32).ln();
        }

        estimate as u64
    }

    /// Merge `other` into `self`, yielding the estimator of the union of
    /// both underlying element sets. `other` is left untouched.
    ///
    /// Fails with [`Error::IncompatibleEstimators`] when the register
    /// counts differ; the receiver is unmodified on error.
    pub fn merge(&mut self, other: &Estimator) -> Result<(), Error> {
        self.check_compatible(other)?;
        for (mine, &theirs) in self.registers.iter_mut().zip(&other.registers) {
            *mine = (*mine).max(theirs);
        }
        Ok(())
    }

    /// Estimate the number of elements common to `self` and `other` by
    /// inclusion-exclusion: `|A| + |B| - |A union B|`.
    ///
    /// This compounds the error of three independent estimates and is
    /// therefore noticeably less accurate than [`Estimator::estimate`];
    /// when the noise drives the difference negative, the result clamps to
    /// zero rather than failing.
    pub fn intersect(&self, other: &Estimator) -> Result<u64, Error> {
        self.check_compatible(other)?;

        let mut union = Estimator::new(self.register_count)?;
        union.merge(self)?;
        union.merge(other)?;

        let union_count = union.estimate();
        let cumulative_count = self.estimate() + other.estimate();
        Ok(cumulative_count.saturating_sub(union_count))
    }

    /// Number of registers `M`.
    pub fn register_count(&self) -> usize {
        self.register_count
    }

    /// Number of top hash bits used for register selection.
    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Bias correction constant for this register count.
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Current register contents, one byte per register.
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Expected relative standard error of the estimate, `1.04 / sqrt(M)`.
    pub fn relative_error(&self) -> f64 {
        1.04 / (self.register_count as f64).sqrt()
    }

    /// Rebuild an estimator from previously captured parts. The decode path
    /// keeps the original snapshot contract and does not re-validate the
    /// construction invariants; see [`Estimator::from_snapshot`].
    pub(crate) fn from_parts(
        register_count: usize,
        index_bits: u32,
        bias: f64,
        registers: Vec<u8>,
    ) -> Self {
        Self {
            register_count,
            index_bits,
            bias,
            registers,
        }
    }

    fn check_compatible(&self, other: &Estimator) -> Result<(), Error> {
        if self.register_count != other.register_count {
            return Err(Error::IncompatibleEstimators {
                left: self.register_count,
                right: other.register_count,
            });
        }
        Ok(())
    }
}

impl Debug for Estimator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Estimator {{ registers: {}, estimate: {} }}",
            self.register_count,
            self.estimate()
        )
    }
}

/// Position of the leftmost 1-bit in `w`, clamped to `max + 1`.
///
/// Equivalent to scanning `w` bit by bit from the top with a starting rank
/// of one; `leading_zeros` compiles to a single LZCNT/CLZ instruction. The
/// clamp at `max + 1` (all `32 - B` remainder bits zero) must be preserved
/// exactly or the rank distribution skews.
#[inline]
fn rank(w: u32, max: u32) -> u8 {
    (w.leading_zeros() + 1).min(max + 1) as u8
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}
