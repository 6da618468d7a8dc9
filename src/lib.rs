#![deny(missing_docs)]

//! # gf2e_prng
//!
//! **gf2e_prng** is a deterministic pseudo-random number generator defined by
//! an affine recurrence over the finite field GF(2^31):
//!
//! ```text
//! x_{n+1} = a(x)·x_n(x) + c(x)  mod h(x)
//! a(x) = x^4 + 1,  c(x) = 1,  h(x) = x^31 + x^13 + x^8 + x^3 + 1
//! ```
//!
//! Each step is computed by a small pipeline of GF(2) primitives: a
//! shift-and-XOR multiplication by the sparse multiplier, addition of the
//! constant, and a sparse reduction that replaces the four excess terms
//! `x^31..x^34` with precomputed residues.  All intermediate values are masked
//! to their declared widths (31 or 35 bits).
//!
//! ## Features
//!
//! * **Polynomial primitives** in [`poly`]: XOR addition, a balanced XOR fold,
//!   multiplication by `a(x)`, carry-less products and long division.
//! * **Step pipeline**: [`affine()`], [`reduce()`] and their composition [`step()`].
//! * **Generator**: [`Generator`] owns the 31-bit state and supports reset,
//!   advance, peek, inverse steps and `O(log n)` jump-ahead.  It implements
//!   `Iterator` and `rand_core::RngCore`.
//! * **Field arithmetic** via the [`Field`] type, used for inversion,
//!   jump-ahead and cross-checks.
//! * **Text notations** for polynomials ([`PolyFormat`]).
//! * **Conformance tooling** in [`vectors`] and parallel range checks in
//!   [`sweep`].
//!
//! The generator is linear: one output reveals the whole stream.  It is meant
//! for reproducible stimulus and simulation, never for secrets.
//!
//! ## Usage
//!
//! ```rust
//! use gf2e_prng::Generator;
//!
//! let mut prng = Generator::new(478_163_327).unwrap();
//! let mut last = 0;
//! for _ in 0..100 {
//!     last = prng.advance();
//! }
//! assert_eq!(last, 2_137_196_284);
//!
//! // Jump-ahead lands on the same state without stepping one by one.
//! let mut fast = Generator::new(478_163_327).unwrap();
//! assert_eq!(fast.jump(100), last);
//! ```

mod affine;
mod error;
mod field;
mod format;
mod io;
pub mod poly;
mod prng;
mod reduce;
#[cfg(not(target_arch = "wasm32"))]
pub mod sweep;
pub mod vectors;

pub use affine::affine;
pub use error::PrngError;
pub use field::Field;
pub use format::{format_poly, parse_poly, PolyFormat};
pub use io::write_sequence;
pub use prng::{check_seed, step, step_back, AffineMap, Generator};
pub use reduce::{check_wide, reduce, REDUCTION_CONSTANTS};
