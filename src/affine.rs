//! The affine half of the recurrence step.

use crate::poly::{add, mul_by_a, C, MASK35};

/// Computes `a(x)·p(x) + c(x)` for a 31-bit polynomial `p`.
///
/// Returns the unreduced 35-bit product `(p << 4) ^ p ^ 1`.  Every 31-bit
/// input is valid; bits above 30 are ignored.
///
/// # Examples
///
/// ```
/// use gf2e_prng::affine;
///
/// assert_eq!(affine(0), 1);
/// assert_eq!(affine(478_163_327), 7_860_332_174);
/// ```
#[inline]
pub fn affine(p: u32) -> u64 {
    add(mul_by_a(p), u64::from(C)) & MASK35
}

#[cfg(test)]
mod tests {
    use super::affine;
    use crate::poly::{clmul, A, MASK35};

    #[test]
    fn test_golden_affine() {
        assert_eq!(affine(478_163_327), 7_860_332_174);
    }

    #[test]
    fn test_affine_extremes() {
        assert_eq!(affine(1), 0b1_0000);
        let top = affine(0x7FFF_FFFF);
        assert!(top <= MASK35);
        assert_eq!(top, clmul(0x7FFF_FFFF, A) ^ 1);
    }
}
