//! Pseudorandom number generator driven by the affine field recurrence.
//!
//! The generator state is a single element of GF(2^31).  Each call to
//! [`Generator::advance`] applies `x ↦ a(x)·x + c(x) mod h(x)` through the
//! sparse [`affine`] and [`reduce`] pipeline and returns the new state.  The
//! map is an affine bijection of the field, so it can also be inverted
//! ([`Generator::retreat`]) and raised to arbitrary powers
//! ([`Generator::jump`]) with general field arithmetic.
//!
//! The generator is linear and trivially predictable from one output; it is
//! meant for reproducible stimulus, not for secrets.

use rand_core::{impls, Error, RngCore};
use tracing::debug;

use crate::affine::affine;
use crate::error::PrngError;
use crate::field::Field;
use crate::poly::{A, C, MASK31, STATE_BITS};
use crate::reduce::reduce;

/// Inverse of `a(x)` in the field.
const A_INV: u32 = Field::inv(A);

/// Applies one recurrence step to a 31-bit state.
///
/// # Examples
///
/// ```
/// use gf2e_prng::step;
///
/// assert_eq!(step(478_163_327), 1_417_889_173);
/// ```
#[inline]
pub fn step(p: u32) -> u32 {
    reduce(affine(p))
}

/// Undoes one recurrence step: returns the unique `q` with `step(q) == p`.
#[inline]
pub fn step_back(p: u32) -> u32 {
    Field::mul(A_INV, Field::add(p, C))
}

/// Validates that `seed` is a field element and narrows it to `u32`.
pub fn check_seed(seed: u64) -> Result<u32, PrngError> {
    if seed > MASK31 {
        return Err(PrngError::InvalidSeed { seed });
    }
    Ok(seed as u32)
}

/// An affine map `x ↦ scale·x + offset` over GF(2^31).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffineMap {
    /// Multiplicative coefficient.
    pub scale: u32,
    /// Additive coefficient.
    pub offset: u32,
}

impl AffineMap {
    /// The identity map.
    pub const IDENTITY: AffineMap = AffineMap {
        scale: 1,
        offset: 0,
    };

    /// The generator's single step, `x ↦ a·x + c`.
    pub const STEP: AffineMap = AffineMap {
        scale: A,
        offset: C,
    };

    /// Evaluates the map at `x`.
    #[inline]
    pub fn apply(&self, x: u32) -> u32 {
        Field::add(Field::mul(self.scale, x), self.offset)
    }

    /// Returns `self ∘ inner`, the map that applies `inner` first.
    pub fn compose(&self, inner: &AffineMap) -> AffineMap {
        AffineMap {
            scale: Field::mul(self.scale, inner.scale),
            offset: Field::add(Field::mul(self.scale, inner.offset), self.offset),
        }
    }

    /// Returns the map applied `n` times, using square-and-multiply.
    pub fn pow(&self, mut n: u64) -> AffineMap {
        let mut base = *self;
        let mut result = AffineMap::IDENTITY;
        while n > 0 {
            if n & 1 == 1 {
                result = base.compose(&result);
            }
            base = base.compose(&base);
            n >>= 1;
        }
        result
    }

    /// Returns the inverse map.
    ///
    /// # Panics
    ///
    /// Panics if `scale` is zero, since such a map is not invertible.
    pub fn inverse(&self) -> AffineMap {
        let scale = Field::inv(self.scale);
        AffineMap {
            scale,
            offset: Field::mul(scale, self.offset),
        }
    }
}

/// Stateful generator over GF(2^31).
///
/// A seed is required at construction, so there is no uninitialised state.
/// The type is `Clone` but not `Copy`; duplicating a stream is always an
/// explicit decision.
///
/// As an [`RngCore`], the generator concatenates successive 31-bit outputs
/// into a bit stream and serves full 32-bit words from it, most significant
/// bits first.  Bits left over from one draw are buffered for the next; only
/// [`reset`](Self::reset) discards them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    state: u32,
    pool: u64,
    pooled: u32,
}

impl Generator {
    /// Creates a generator whose current state is `seed`.
    ///
    /// Fails with [`PrngError::InvalidSeed`] unless `seed < 2^31`.
    pub fn new(seed: u32) -> Result<Self, PrngError> {
        let state = check_seed(u64::from(seed))?;
        debug!(seed = state, "generator seeded");
        Ok(Self {
            state,
            pool: 0,
            pooled: 0,
        })
    }

    /// Replaces the state with `seed`.
    ///
    /// On error the previous state is kept.
    pub fn reset(&mut self, seed: u32) -> Result<(), PrngError> {
        self.state = check_seed(u64::from(seed))?;
        self.pool = 0;
        self.pooled = 0;
        debug!(seed = self.state, "generator reset");
        Ok(())
    }

    /// Performs one recurrence step and returns the new state.
    #[inline]
    pub fn advance(&mut self) -> u32 {
        self.state = step(self.state);
        self.state
    }

    /// Returns the current state without advancing.
    #[inline]
    pub fn peek(&self) -> u32 {
        self.state
    }

    /// Steps backwards once and returns the new (earlier) state.
    pub fn retreat(&mut self) -> u32 {
        self.state = step_back(self.state);
        self.state
    }

    /// Advances by `n` steps in `O(log n)` field operations.
    ///
    /// Equivalent to calling [`advance`](Self::advance) `n` times; returns the
    /// resulting state (the current state when `n == 0`).
    pub fn jump(&mut self, n: u64) -> u32 {
        self.state = AffineMap::STEP.pow(n).apply(self.state);
        debug!(steps = n, state = self.state, "generator jumped");
        self.state
    }

    /// Counts the steps until the trajectory first returns to the current
    /// state, giving up after `limit` steps.
    ///
    /// The step map is a bijection, so every state lies on a pure cycle.  As
    /// `2^31 - 1` is prime, that cycle has length `2^31 - 1` for every state
    /// except [`fixed_point`](Self::fixed_point), whose cycle has length one.
    pub fn cycle_length(&self, limit: u64) -> Option<u64> {
        let start = self.state;
        let mut x = start;
        for n in 1..=limit {
            x = step(x);
            if x == start {
                return Some(n);
            }
        }
        None
    }

    /// Returns the unique state left unchanged by a step, `c / (1 + a)`.
    pub fn fixed_point() -> u32 {
        Field::div(C, Field::add(1, A))
    }

    /// Takes the next `n <= 32` bits of the output stream.
    fn take_bits(&mut self, n: u32) -> u64 {
        // pooled < n <= 32 inside the loop, so the pool never exceeds 62 bits.
        while self.pooled < n {
            self.pool = (self.pool << STATE_BITS) | u64::from(self.advance());
            self.pooled += STATE_BITS;
        }
        self.pooled -= n;
        let bits = self.pool >> self.pooled;
        self.pool &= (1u64 << self.pooled) - 1;
        bits
    }
}

impl Iterator for Generator {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.advance())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Every output bit comes from the state stream, so all 32 bits of
/// `next_u32` vary.
impl RngCore for Generator {
    fn next_u32(&mut self) -> u32 {
        self.take_bits(u32::BITS) as u32
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
