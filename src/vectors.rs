//! Conformance vectors: golden values, seeded random vectors and vector files.
//!
//! A vector file is a JSON document holding a list of tagged [`Vector`]
//! records and a domain-separated BLAKE2b-256 digest over their canonical
//! byte encoding.  Reading a file recomputes the digest, so edited or
//! truncated files are rejected before any vector is evaluated.

use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use blake2::digest::{consts::U32, Digest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::affine::affine;
use crate::error::PrngError;
use crate::poly::{xor_fold, MASK31, MASK35, STATE_BITS, WIDE_BITS};
use crate::prng::{step, Generator};
use crate::reduce::{check_wide, check_width, reduce};

type Blake2b256 = blake2::Blake2b<U32>;

const VECTOR_DOMAIN: &[u8] = b"GF2E_PRNG_VECTORS";

/// Format version written to new vector files.
pub const VECTOR_FILE_VERSION: u32 = 1;

/// Longest sequence evaluated by sequential advances; longer ones jump.
pub const SEQUENTIAL_STEP_LIMIT: u64 = 1 << 20;

/// Seed used by the reference sequence vector.
pub const REFERENCE_SEED: u32 = 478_163_327;

/// One conformance record: an operation, its inputs and the expected output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Vector {
    /// XOR of `inputs`, masked to `width` bits.
    XorFold {
        /// Terms to combine.
        inputs: Vec<u64>,
        /// Bit width of every term and of the result.
        width: u32,
        /// Expected sum.
        expected: u64,
    },
    /// Affine transform of a 31-bit input.
    Affine {
        /// 31-bit input polynomial.
        input: u32,
        /// Expected 35-bit output.
        expected: u64,
    },
    /// Reduction of a 35-bit input modulo `h(x)`.
    Reduce {
        /// 35-bit input polynomial.
        input: u64,
        /// Expected 31-bit remainder.
        expected: u32,
    },
    /// One full recurrence step.
    Step {
        /// 31-bit state before the step.
        input: u32,
        /// Expected state after the step.
        expected: u32,
    },
    /// Final state after `steps` sequential advances from `seed`.
    Sequence {
        /// Initial state.
        seed: u32,
        /// Number of advances.
        steps: u64,
        /// Expected final state.
        expected: u32,
    },
}

fn check_input(input: u32) -> Result<u32, PrngError> {
    check_width(u64::from(input), STATE_BITS).map(|v| v as u32)
}

fn width_mask(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

impl Vector {
    /// Short operation name, matching the JSON tag.
    pub fn op(&self) -> &'static str {
        match self {
            Vector::XorFold { .. } => "xor_fold",
            Vector::Affine { .. } => "affine",
            Vector::Reduce { .. } => "reduce",
            Vector::Step { .. } => "step",
            Vector::Sequence { .. } => "sequence",
        }
    }

    /// Expected output, widened to `u64`.
    pub fn expected(&self) -> u64 {
        match self {
            Vector::XorFold { expected, .. } | Vector::Affine { expected, .. } => *expected,
            Vector::Reduce { expected, .. }
            | Vector::Step { expected, .. }
            | Vector::Sequence { expected, .. } => u64::from(*expected),
        }
    }

    /// Evaluates the vector's operation with this build's arithmetic.
    ///
    /// Operands wider than the operation accepts are rejected rather than
    /// masked.  Sequence vectors advance one step at a time up to
    /// [`SEQUENTIAL_STEP_LIMIT`] steps and jump ahead beyond it.
    pub fn compute(&self) -> Result<u64, PrngError> {
        let actual = match self {
            Vector::XorFold { inputs, width, .. } => {
                let terms = inputs
                    .iter()
                    .map(|v| check_width(*v, *width))
                    .collect::<Result<Vec<u64>, _>>()?;
                xor_fold(&terms) & width_mask(*width)
            }
            Vector::Affine { input, .. } => affine(check_input(*input)?),
            Vector::Reduce { input, .. } => u64::from(reduce(check_wide(*input)?)),
            Vector::Step { input, .. } => u64::from(step(check_input(*input)?)),
            Vector::Sequence { seed, steps, .. } => {
                let mut prng = Generator::new(*seed)?;
                if *steps <= SEQUENTIAL_STEP_LIMIT {
                    for _ in 0..*steps {
                        prng.advance();
                    }
                } else {
                    prng.jump(*steps);
                }
                u64::from(prng.peek())
            }
        };
        Ok(actual)
    }

    fn absorb(&self, hasher: &mut Blake2b256) {
        let op = self.op().as_bytes();
        hasher.update((op.len() as u64).to_be_bytes());
        hasher.update(op);
        match self {
            Vector::XorFold { inputs, width, .. } => {
                hasher.update(width.to_be_bytes());
                hasher.update((inputs.len() as u64).to_be_bytes());
                for value in inputs {
                    hasher.update(value.to_be_bytes());
                }
            }
            Vector::Affine { input, .. } | Vector::Step { input, .. } => {
                hasher.update(input.to_be_bytes());
            }
            Vector::Reduce { input, .. } => hasher.update(input.to_be_bytes()),
            Vector::Sequence { seed, steps, .. } => {
                hasher.update(seed.to_be_bytes());
                hasher.update(steps.to_be_bytes());
            }
        }
        hasher.update(self.expected().to_be_bytes());
    }
}

/// Returns the reference vectors every build must reproduce bit-exactly.
pub fn golden_vectors() -> Vec<Vector> {
    vec![
        Vector::XorFold {
            inputs: vec![7_041_284_509, 14_066_143_831, 9_548_617_438],
            width: WIDE_BITS,
            expected: 3_707_600_148,
        },
        Vector::XorFold {
            inputs: vec![
                478_163_327,
                107_420_369,
                1_181_241_943,
                1_051_802_512,
                958_682_846,
            ],
            width: STATE_BITS,
            expected: 1_528_435_895,
        },
        Vector::Affine {
            input: 478_163_327,
            expected: 7_860_332_174,
        },
        Vector::Reduce {
            input: 7_041_284_509,
            expected: 598_809_222,
        },
        Vector::Step {
            input: 478_163_327,
            expected: 1_417_889_173,
        },
        Vector::Sequence {
            seed: REFERENCE_SEED,
            steps: 100,
            expected: 2_137_196_284,
        },
    ]
}

/// Generates `count` vectors from a seeded RNG, cycling through every
/// operation kind.  Expected values come from this build.
pub fn random_vectors(rng_seed: u64, count: usize) -> Vec<Vector> {
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let vector = match i % 5 {
            0 => {
                let inputs: Vec<u64> = (0..3).map(|_| rng.gen_range(0..=MASK35)).collect();
                let expected = xor_fold(&inputs);
                Vector::XorFold {
                    inputs,
                    width: WIDE_BITS,
                    expected,
                }
            }
            1 => {
                let input = rng.gen_range(0..=MASK31) as u32;
                Vector::Affine {
                    input,
                    expected: affine(input),
                }
            }
            2 => {
                let input = rng.gen_range(0..=MASK35);
                Vector::Reduce {
                    input,
                    expected: reduce(input),
                }
            }
            3 => {
                let input = rng.gen_range(0..=MASK31) as u32;
                Vector::Step {
                    input,
                    expected: step(input),
                }
            }
            _ => {
                let seed = rng.gen_range(0..=MASK31) as u32;
                let steps = rng.gen_range(1..=256u64);
                let mut state = seed;
                for _ in 0..steps {
                    state = step(state);
                }
                Vector::Sequence {
                    seed,
                    steps,
                    expected: state,
                }
            }
        };
        out.push(vector);
    }
    out
}

/// Computes the hex-encoded digest of a vector list.
pub fn digest_vectors(vectors: &[Vector]) -> String {
    let mut hasher = Blake2b256::new();
    hasher.update(VECTOR_DOMAIN);
    hasher.update((vectors.len() as u64).to_be_bytes());
    for vector in vectors {
        vector.absorb(&mut hasher);
    }
    hex::encode(hasher.finalize())
}

/// Serialized form of a vector file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorFile {
    /// File format version.
    pub version: u32,
    /// Hex BLAKE2b-256 digest of `vectors`.
    pub digest: String,
    /// The recorded vectors.
    pub vectors: Vec<Vector>,
}

impl VectorFile {
    /// Wraps `vectors` with the current version and their digest.
    pub fn new(vectors: Vec<Vector>) -> Self {
        Self {
            version: VECTOR_FILE_VERSION,
            digest: digest_vectors(&vectors),
            vectors,
        }
    }
}

/// Writes `vectors` as a pretty-printed JSON vector file.
pub fn write_vector_file(path: impl AsRef<Path>, vectors: Vec<Vector>) -> Result<(), PrngError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let file = VectorFile::new(vectors);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &file)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(path = %path.display(), count = file.vectors.len(), "vector file written");
    Ok(())
}

/// Reads a vector file and checks its digest.
pub fn read_vector_file(path: impl AsRef<Path>) -> Result<VectorFile, PrngError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let file: VectorFile = serde_json::from_reader(reader)?;
    let computed = digest_vectors(&file.vectors);
    if computed != file.digest {
        return Err(PrngError::DigestMismatch {
            stored: file.digest,
            computed,
        });
    }
    Ok(file)
}

/// A vector whose computed output differs from the recorded one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Position in the vector list.
    pub index: usize,
    /// Operation name.
    pub op: &'static str,
    /// Recorded value.
    pub expected: u64,
    /// Computed value.
    pub actual: u64,
}

impl From<Mismatch> for PrngError {
    fn from(m: Mismatch) -> Self {
        PrngError::VectorMismatch {
            index: m.index,
            op: m.op,
            expected: m.expected,
            actual: m.actual,
        }
    }
}

/// Outcome of checking a list of vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Number of vectors evaluated.
    pub checked: usize,
    /// Vectors that failed to reproduce.
    pub mismatches: Vec<Mismatch>,
}

impl VerificationReport {
    /// Returns `true` when every vector reproduced.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Converts the first mismatch, if any, into an error.
    pub fn into_result(self) -> Result<usize, PrngError> {
        match self.mismatches.into_iter().next() {
            Some(mismatch) => Err(mismatch.into()),
            None => Ok(self.checked),
        }
    }
}

/// Evaluates every vector and collects the ones that do not reproduce.
///
/// Malformed vectors (an operand wider than its operation accepts, or a
/// sequence seed outside the field) abort with an error.
pub fn verify_vectors(vectors: &[Vector]) -> Result<VerificationReport, PrngError> {
    let mut report = VerificationReport::default();
    for (index, vector) in vectors.iter().enumerate() {
        let actual = vector.compute()?;
        report.checked += 1;
        if actual != vector.expected() {
            warn!(index, op = vector.op(), expected = vector.expected(), actual, "vector mismatch");
            report.mismatches.push(Mismatch {
                index,
                op: vector.op(),
                expected: vector.expected(),
                actual,
            });
        }
    }
    info!(checked = report.checked, failed = report.mismatches.len(), "vectors verified");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(tag: &str) -> std::path::PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("gf2e_prng_{tag}_{unique}"))
    }

    #[test]
    fn test_golden_vectors_reproduce() {
        let report = verify_vectors(&golden_vectors()).unwrap();
        assert_eq!(report.checked, 6);
        assert!(report.passed(), "{:?}", report.mismatches);
    }

    #[test]
    fn test_random_vectors_are_deterministic() {
        let a = random_vectors(42, 25);
        let b = random_vectors(42, 25);
        assert_eq!(a, b);
        assert_ne!(a, random_vectors(43, 25));
        assert!(verify_vectors(&a).unwrap().passed());
    }

    #[test]
    fn test_mismatch_is_reported() {
        let vectors = vec![Vector::Step {
            input: 478_163_327,
            expected: 1,
        }];
        let report = verify_vectors(&vectors).unwrap();
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].actual, 1_417_889_173);
        assert!(matches!(
            report.into_result(),
            Err(PrngError::VectorMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_sequence_seed_is_an_error() {
        let vectors = vec![Vector::Sequence {
            seed: u32::MAX,
            steps: 1,
            expected: 0,
        }];
        assert!(matches!(
            verify_vectors(&vectors),
            Err(PrngError::InvalidSeed { .. })
        ));
    }

    #[test]
    fn test_oversized_operands_are_errors() {
        let affine_row = Vector::Affine {
            input: 1 << 31,
            expected: affine(1 << 31),
        };
        assert!(matches!(
            affine_row.compute(),
            Err(PrngError::InputTooWide { value, bits: 31 }) if value == 1 << 31
        ));
        let step_row = Vector::Step {
            input: u32::MAX,
            expected: 0,
        };
        assert!(matches!(
            verify_vectors(&[step_row]),
            Err(PrngError::InputTooWide { .. })
        ));
        let reduce_row = Vector::Reduce {
            input: (1 << 40) | 5,
            expected: 5,
        };
        assert!(matches!(
            reduce_row.compute(),
            Err(PrngError::InputTooWide { bits: 35, .. })
        ));
        let fold_row = Vector::XorFold {
            inputs: vec![1, 1 << 31],
            width: STATE_BITS,
            expected: 1,
        };
        assert!(matches!(
            fold_row.compute(),
            Err(PrngError::InputTooWide { bits: 31, .. })
        ));
    }

    #[test]
    fn test_long_sequences_jump_ahead() {
        let full_period = Vector::Sequence {
            seed: REFERENCE_SEED,
            steps: crate::field::Field::MULTIPLICATIVE_ORDER,
            expected: REFERENCE_SEED,
        };
        // 2^64 - 1 is 3 modulo the period 2^31 - 1.
        let longest = Vector::Sequence {
            seed: REFERENCE_SEED,
            steps: u64::MAX,
            expected: step(step(step(REFERENCE_SEED))),
        };
        let report = verify_vectors(&[full_period, longest]).unwrap();
        assert!(report.passed(), "{:?}", report.mismatches);
    }

    #[test]
    fn test_sequence_paths_agree_at_limit() {
        let mut slow = Generator::new(REFERENCE_SEED).unwrap();
        for _ in 0..SEQUENTIAL_STEP_LIMIT + 1 {
            slow.advance();
        }
        let row = Vector::Sequence {
            seed: REFERENCE_SEED,
            steps: SEQUENTIAL_STEP_LIMIT + 1,
            expected: slow.peek(),
        };
        assert_eq!(row.compute().unwrap(), u64::from(slow.peek()));
    }

    #[test]
    fn test_file_round_trip_and_tamper_detection() {
        let dir = scratch_dir("vectors");
        let path = dir.join("golden.json");
        write_vector_file(&path, golden_vectors()).unwrap();
        let file = read_vector_file(&path).unwrap();
        assert_eq!(file.version, VECTOR_FILE_VERSION);
        assert_eq!(file.vectors, golden_vectors());

        let text = fs::read_to_string(&path).unwrap();
        let tampered = text.replace("2137196284", "2137196285");
        assert_ne!(text, tampered);
        fs::write(&path, tampered).unwrap();
        assert!(matches!(
            read_vector_file(&path),
            Err(PrngError::DigestMismatch { .. })
        ));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_json_uses_op_tag() {
        let json = serde_json::to_string(&golden_vectors()[2]).unwrap();
        assert_eq!(json, r#"{"op":"affine","input":478163327,"expected":7860332174}"#);
    }
}
