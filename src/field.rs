//! Finite field arithmetic.
//!
//! This module provides arithmetic in GF(2^31), realised as binary
//! polynomials of degree below 31 modulo the fixed irreducible
//! `h(x) = x^31 + x^13 + x^8 + x^3 + 1`.  The [`Field`](struct.Field.html)
//! type exposes addition, subtraction, multiplication, exponentiation and
//! inversion.  All operations reduce their operands and results modulo `h`.
//!
//! The recurrence step itself only needs the sparse multiply-by-`a` path; the
//! general multiplication here backs the inverse step, jump-ahead, and the
//! cross-checks in the test-suite.

use crate::poly::{clmul, MASK31};

/// GF(2^31) with the generator's fixed modulus.
///
/// Elements are `u32` values below `2^31`.  Operands with bit 31 set are
/// reduced modulo `h` before use, so every operation is total except
/// inversion of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Field;

/// Folds a polynomial of degree at most 62 into the field.
///
/// Substitutes `x^31 ≡ x^13 + x^8 + x^3 + 1` until nothing remains above bit
/// 30; two passes suffice for a full 31×31-bit product.
#[inline]
const fn fold(y: u64) -> u32 {
    let mut y = y;
    while y >> 31 != 0 {
        let hi = y >> 31;
        y = (y & MASK31) ^ hi ^ (hi << 3) ^ (hi << 8) ^ (hi << 13);
    }
    y as u32
}

impl Field {
    /// Order of the multiplicative group, `2^31 - 1`.
    pub const MULTIPLICATIVE_ORDER: u64 = MASK31;

    /// Reduces an arbitrary 32-bit polynomial into the field.
    #[inline]
    pub const fn element(a: u32) -> u32 {
        fold(a as u64)
    }

    /// Adds two field elements.
    #[inline]
    pub const fn add(a: u32, b: u32) -> u32 {
        Self::element(a) ^ Self::element(b)
    }

    /// Subtracts `b` from `a`; identical to addition in characteristic two.
    #[inline]
    pub const fn sub(a: u32, b: u32) -> u32 {
        Self::add(a, b)
    }

    /// Multiplies two field elements.
    #[inline]
    pub const fn mul(a: u32, b: u32) -> u32 {
        fold(clmul(Self::element(a), Self::element(b)))
    }

    /// Exponentiates `a` by `e`.
    pub const fn pow(a: u32, e: u64) -> u32 {
        let mut base = Self::element(a);
        let mut e = e;
        let mut result = 1u32;
        while e > 0 {
            if e & 1 == 1 {
                result = Self::mul(result, base);
            }
            base = Self::mul(base, base);
            e >>= 1;
        }
        result
    }

    /// Computes the multiplicative inverse of `a`.
    ///
    /// # Panics
    ///
    /// Panics if `a` is zero modulo `h`.  Every non-zero element of the
    /// field has a unique inverse.
    pub const fn inv(a: u32) -> u32 {
        assert!(Self::element(a) != 0, "cannot invert zero");
        // a^(2^31 - 2) = a^-1 since the multiplicative group has order 2^31 - 1.
        Self::pow(a, Self::MULTIPLICATIVE_ORDER - 1)
    }

    /// Divides `a` by `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero modulo `h`.
    pub const fn div(a: u32, b: u32) -> u32 {
        Self::mul(a, Self::inv(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::{poly_mod, A, MODULUS};

    #[test]
    fn test_mul_matches_long_division() {
        let pairs = [
            (478_163_327u32, 107_420_369u32),
            (0x7FFF_FFFF, 0x7FFF_FFFF),
            (A, 1 << 30),
            (0, 12345),
        ];
        for (a, b) in pairs {
            let expected = poly_mod(clmul(a, b), MODULUS);
            assert_eq!(u64::from(Field::mul(a, b)), expected);
        }
    }

    #[test]
    fn test_inverse_round_trip() {
        for a in [1u32, 2, A, 16, 478_163_327, 0x7FFF_FFFF] {
            assert_eq!(Field::mul(a, Field::inv(a)), 1);
            assert_eq!(Field::div(a, a), 1);
        }
    }

    #[test]
    fn test_modulus_is_irreducible() {
        // For prime degree 31, h is irreducible iff x^(2^31) ≡ x (mod h)
        // and h has no root in GF(2).
        let mut x = 2u32;
        for _ in 0..31 {
            x = Field::mul(x, x);
        }
        assert_eq!(x, 2);
        assert_eq!(MODULUS & 1, 1, "h(0) must be 1");
        assert_eq!(MODULUS.count_ones() % 2, 1, "h(1) must be 1");
    }

    #[test]
    fn test_element_reduces_top_bit() {
        assert_eq!(Field::element(1 << 31), 8457);
        assert_eq!(Field::add(1 << 31, 8457), 0);
        assert_eq!(Field::sub(5, 5), 0);
    }

    #[test]
    fn test_pow_identities() {
        assert_eq!(Field::pow(A, 0), 1);
        assert_eq!(Field::pow(A, 1), A);
        assert_eq!(Field::pow(A, Field::MULTIPLICATIVE_ORDER), 1);
    }

    #[test]
    #[should_panic(expected = "cannot invert zero")]
    fn test_inverse_of_zero_panics() {
        Field::inv(0);
    }
}
