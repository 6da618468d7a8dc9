//! Error type shared by the generator, the text formats and the vector tooling.

use thiserror::Error;

/// Errors raised by fallible operations in this crate.
///
/// Field arithmetic itself never fails; every variant here is a range
/// violation at an API boundary or a problem with external input.
#[derive(Debug, Error)]
pub enum PrngError {
    #[error("seed {seed} is not a field element (must be < 2^31)")]
    /// Seed does not fit in 31 bits.
    InvalidSeed {
        /// The rejected seed.
        seed: u64,
    },
    #[error("input {value} does not fit in {bits} bits")]
    /// A polynomial operand is wider than the operation accepts.
    InputTooWide {
        /// The rejected operand.
        value: u64,
        /// Width the operation accepts.
        bits: u32,
    },
    #[error("cannot parse {input:?} as {format} polynomial: {reason}")]
    /// Polynomial text could not be parsed in the requested notation.
    Parse {
        /// Offending input text.
        input: String,
        /// Notation that was requested.
        format: &'static str,
        /// What went wrong.
        reason: String,
    },
    #[error("unknown polynomial format {0:?} (expected int, hex, bin or alg)")]
    /// Notation name is not one of the supported formats.
    UnknownFormat(String),
    #[error("range starting at {start} with length {len} leaves the field")]
    /// Sweep range extends past `2^31 - 1`.
    RangeOutsideField {
        /// First state of the range.
        start: u64,
        /// Number of states requested.
        len: u64,
    },
    #[error("vector {index} ({op}) expected {expected}, computed {actual}")]
    /// A conformance vector did not reproduce.
    VectorMismatch {
        /// Position of the vector in its file.
        index: usize,
        /// Operation name of the vector.
        op: &'static str,
        /// Stored expected value.
        expected: u64,
        /// Value computed by this build.
        actual: u64,
    },
    #[error("vector file digest mismatch (stored {stored}, computed {computed})")]
    /// Vector file contents do not match the recorded digest.
    DigestMismatch {
        /// Digest recorded in the file.
        stored: String,
        /// Digest recomputed from the vectors.
        computed: String,
    },
    #[error("io error: {0}")]
    /// Underlying filesystem failure.
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    /// JSON encoding or decoding failure.
    Json(#[from] serde_json::Error),
}
