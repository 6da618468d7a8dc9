//! Polynomial primitives over GF(2).
//!
//! A binary polynomial is stored as an unsigned integer whose bit `i` is the
//! coefficient of `x^i`.  Addition is XOR, and multiplication is the
//! carry-less product.  The helpers here are deliberately width-agnostic; the
//! fixed 31/35-bit widths of the generator are enforced by the callers through
//! the masks defined below.

use std::ops::BitXor;

/// Width in bits of a field element (generator state, seed, reduced output).
pub const STATE_BITS: u32 = 31;

/// Width in bits of the affine product before reduction.
pub const WIDE_BITS: u32 = 35;

/// Mask selecting the low [`STATE_BITS`] bits.
pub const MASK31: u64 = (1 << STATE_BITS) - 1;

/// Mask selecting the low [`WIDE_BITS`] bits.
pub const MASK35: u64 = (1 << WIDE_BITS) - 1;

/// The multiplier `a(x) = x^4 + 1`.
pub const A: u32 = 0b1_0001;

/// The additive constant `c(x) = 1`.
pub const C: u32 = 1;

/// The irreducible modulus `h(x) = x^31 + x^13 + x^8 + x^3 + 1`.
pub const MODULUS: u64 = (1 << 31) | (1 << 13) | (1 << 8) | (1 << 3) | 1;

/// Adds two polynomials over GF(2).
#[inline]
pub fn add<T>(p: T, q: T) -> T
where
    T: BitXor<Output = T>,
{
    p ^ q
}

/// Sums any number of polynomials with a balanced pairwise XOR tree.
///
/// The tree halves the slice at each level, mirroring the depth-optimal
/// combinational layout.  XOR is associative and commutative, so the result is
/// identical to a left fold; an empty slice sums to zero.
pub fn xor_fold<T>(terms: &[T]) -> T
where
    T: Copy + Default + BitXor<Output = T>,
{
    match terms {
        [] => T::default(),
        [single] => *single,
        _ => {
            let (left, right) = terms.split_at(terms.len() / 2);
            xor_fold(left) ^ xor_fold(right)
        }
    }
}

/// Multiplies a 31-bit polynomial by `a(x) = x^4 + 1`.
///
/// The input is truncated to 31 bits first; the result has degree at most 34
/// and is masked to 35 bits.
#[inline]
pub fn mul_by_a(p: u32) -> u64 {
    let p = u64::from(p) & MASK31;
    ((p << 4) ^ p) & MASK35
}

/// Carry-less product of two polynomials of degree below 32.
pub const fn clmul(p: u32, q: u32) -> u64 {
    let p = p as u64;
    let mut out = 0u64;
    let mut i = 0;
    while i < 32 {
        if (q >> i) & 1 == 1 {
            out ^= p << i;
        }
        i += 1;
    }
    out
}

/// Returns the degree of `p`, or `None` for the zero polynomial.
#[inline]
pub const fn degree(p: u64) -> Option<u32> {
    if p == 0 {
        None
    } else {
        Some(63 - p.leading_zeros())
    }
}

/// Returns the exponents with non-zero coefficient, lowest first.
pub fn bit_positions(p: u64) -> Vec<u32> {
    (0..u64::BITS).filter(|&i| (p >> i) & 1 == 1).collect()
}

/// Computes `y mod h` by schoolbook long division over GF(2).
///
/// This is the slow, general reference reduction; the generator uses the
/// sparse substitution in [`crate::reduce`].
///
/// # Panics
///
/// Panics if `h` is zero.
pub const fn poly_mod(y: u64, h: u64) -> u64 {
    assert!(h != 0, "modulus must be non-zero");
    let deg_h = 63 - h.leading_zeros();
    let mut rem = y;
    while rem != 0 && 63 - rem.leading_zeros() >= deg_h {
        let shift = 63 - rem.leading_zeros() - deg_h;
        rem ^= h << shift;
    }
    rem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_of_three_wide_values() {
        let terms = [7_041_284_509u64, 14_066_143_831, 9_548_617_438];
        assert_eq!(xor_fold(&terms) & MASK35, 3_707_600_148);
    }

    #[test]
    fn test_xor_of_five_state_values() {
        let terms = [
            478_163_327u32,
            107_420_369,
            1_181_241_943,
            1_051_802_512,
            958_682_846,
        ];
        assert_eq!(xor_fold(&terms), 1_528_435_895);
        let left = terms.iter().fold(0u32, |acc, &t| add(acc, t));
        assert_eq!(left, 1_528_435_895);
    }

    #[test]
    fn test_add_is_self_inverse() {
        assert_eq!(add(0x5555_u64, 0x5555), 0);
        assert_eq!(xor_fold::<u64>(&[]), 0);
    }

    #[test]
    fn test_mul_by_a_matches_clmul() {
        for p in [0u32, 1, 0x7FFF_FFFF, 478_163_327, 0x4000_0000] {
            assert_eq!(mul_by_a(p), clmul(p, A));
        }
        // Bit 31 is outside the state width and must be dropped.
        assert_eq!(mul_by_a(0x8000_0000), 0);
    }

    #[test]
    fn test_degree_and_positions() {
        assert_eq!(degree(0), None);
        assert_eq!(degree(1), Some(0));
        assert_eq!(degree(MODULUS), Some(31));
        assert_eq!(bit_positions(0b10110), vec![1, 2, 4]);
        assert_eq!(bit_positions(MODULUS), vec![0, 3, 8, 13, 31]);
    }

    #[test]
    fn test_poly_mod_small() {
        // (x^3 + x + 1) is irreducible; x^3 reduces to x + 1.
        assert_eq!(poly_mod(0b1000, 0b1011), 0b011);
        assert_eq!(poly_mod(0b0110, 0b1011), 0b0110);
        assert_eq!(poly_mod(MODULUS, MODULUS), 0);
    }
}
