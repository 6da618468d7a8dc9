//! Sparse reduction of 35-bit products modulo `h(x)`.
//!
//! Because `h(x) = x^31 + x^13 + x^8 + x^3 + 1`, the relation
//! `x^31 ≡ x^13 + x^8 + x^3 + 1` lets each of the four excess terms
//! `x^31..x^34` be replaced by a fixed 31-bit constant.  The constants are
//! `R << (k - 31)`; the highest has degree 16, so none needs further folding.

use crate::error::PrngError;
use crate::poly::{poly_mod, xor_fold, MASK31, MASK35, MODULUS, STATE_BITS, WIDE_BITS};

const EXCESS_TERMS: usize = (WIDE_BITS - STATE_BITS) as usize;

/// `x^k mod h(x)` for `k = 31, 32, 33, 34`, derived at compile time.
pub const REDUCTION_CONSTANTS: [u32; EXCESS_TERMS] = derive_reduction_constants();

const fn derive_reduction_constants() -> [u32; EXCESS_TERMS] {
    let mut out = [0u32; EXCESS_TERMS];
    let mut k = 0;
    while k < EXCESS_TERMS {
        out[k] = poly_mod(1u64 << (STATE_BITS as usize + k), MODULUS) as u32;
        k += 1;
    }
    out
}

/// Fails with [`PrngError::InputTooWide`] if `value` has a bit at or above
/// position `bits`.
pub(crate) fn check_width(value: u64, bits: u32) -> Result<u64, PrngError> {
    if bits < u64::BITS && value >> bits != 0 {
        return Err(PrngError::InputTooWide { value, bits });
    }
    Ok(value)
}

/// Validates that `y` is a 35-bit polynomial, the domain of [`reduce`].
///
/// # Examples
///
/// ```
/// use gf2e_prng::check_wide;
///
/// assert_eq!(check_wide(7_041_284_509).unwrap(), 7_041_284_509);
/// assert!(check_wide((1 << 40) | 5).is_err());
/// ```
pub fn check_wide(y: u64) -> Result<u64, PrngError> {
    check_width(y, WIDE_BITS)
}

/// Reduces a 35-bit polynomial modulo `h(x)`.
///
/// The input is masked to 35 bits, so the function is total; the result is
/// always below `2^31`.  Callers handling untrusted input run it through
/// [`check_wide`] first.
///
/// # Examples
///
/// ```
/// use gf2e_prng::reduce;
///
/// assert_eq!(reduce(7_041_284_509), 598_809_222);
/// assert_eq!(reduce(1 << 31), 8457);
/// ```
pub fn reduce(y: u64) -> u32 {
    let y = y & MASK35;
    let mut terms = [0u32; EXCESS_TERMS + 1];
    terms[0] = (y & MASK31) as u32;
    for (k, constant) in REDUCTION_CONSTANTS.iter().enumerate() {
        if (y >> (STATE_BITS as usize + k)) & 1 == 1 {
            terms[k + 1] = *constant;
        }
    }
    xor_fold(&terms) & MASK31 as u32
}
