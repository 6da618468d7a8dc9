//! Parallel exhaustive checks over contiguous blocks of states.
//!
//! For every state `p` in the block a sweep confirms that the step output is a
//! field element, that [`step_back`] recovers `p` (so the step is injective
//! on the block), and that the sparse reduction agrees with schoolbook long
//! division.  Sweeping `0..2^31` in blocks therefore checks bijectivity of the
//! whole map.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::affine::affine;
use crate::error::PrngError;
use crate::poly::{poly_mod, MASK31, MODULUS};
use crate::prng::{step, step_back};
use crate::reduce::reduce;

/// Failures stop being recorded past this count; the counter keeps going.
pub const MAX_RECORDED_FAILURES: usize = 64;

/// Result of a range sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// First state checked.
    pub start: u32,
    /// Number of states checked.
    pub len: u32,
    /// Number of states that failed any check.
    pub failed: u64,
    /// The lowest failing states, at most [`MAX_RECORDED_FAILURES`], ascending.
    pub failures: Vec<u32>,
}

impl SweepReport {
    /// Returns `true` when no state failed.
    pub fn passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs every per-state check for `p`.
pub fn check_state(p: u32) -> bool {
    let wide = affine(p);
    let next = reduce(wide);
    u64::from(next) <= MASK31
        && next == step(p)
        && step_back(next) == p
        && u64::from(next) == poly_mod(wide, MODULUS)
}

/// Sweeps the states `start..start + len` in parallel.
///
/// Fails with [`PrngError::RangeOutsideField`] if the block extends past
/// `2^31 - 1`.
pub fn sweep(start: u32, len: u32) -> Result<SweepReport, PrngError> {
    sweep_with(start, len, check_state)
}

/// Sweeps with an arbitrary per-state check.
///
/// Each rayon split keeps at most [`MAX_RECORDED_FAILURES`] states, and
/// merging keeps the lowest ones, so memory stays bounded however many states
/// fail.
fn sweep_with<F>(start: u32, len: u32, check: F) -> Result<SweepReport, PrngError>
where
    F: Fn(u32) -> bool + Sync,
{
    let end = u64::from(start) + u64::from(len);
    if end > MASK31 + 1 {
        return Err(PrngError::RangeOutsideField {
            start: u64::from(start),
            len: u64::from(len),
        });
    }
    let (failed, failures) = (start..start + len)
        .into_par_iter()
        .filter(|&p| !check(p))
        .fold(
            || (0u64, Vec::new()),
            |(count, mut kept), p| {
                if kept.len() < MAX_RECORDED_FAILURES {
                    kept.push(p);
                }
                (count + 1, kept)
            },
        )
        .reduce(
            || (0u64, Vec::new()),
            |(left_count, mut left), (right_count, right)| {
                left.extend(right);
                left.truncate(MAX_RECORDED_FAILURES);
                (left_count + right_count, left)
            },
        );
    if let Some(first) = failures.first() {
        warn!(start, len, failed, first, "sweep found failing states");
    } else {
        info!(start, len, "sweep passed");
    }
    Ok(SweepReport {
        start,
        len,
        failed,
        failures,
    })
}
