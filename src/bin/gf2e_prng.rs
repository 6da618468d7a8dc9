//! Command-line front-end for the GF(2^31) affine generator.
//!
//! Subcommands cover streaming outputs, evaluating single pipeline stages,
//! jump-ahead, polynomial notation conversion, and producing or checking
//! conformance vector files.  Polynomial arguments are read in the notation
//! given by `--from` and printed in the notation given by `--to`.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use gf2e_prng::vectors::{
    golden_vectors, random_vectors, read_vector_file, verify_vectors, write_vector_file,
};
use gf2e_prng::{
    affine, check_seed, check_wide, format_poly, parse_poly, reduce, step, write_sequence, Generator,
    PolyFormat,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "gf2e-prng")]
#[command(about = "Affine pseudo-random generator over GF(2^31)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Notation of polynomial arguments (int, hex, bin, alg)
    #[arg(long, global = true, default_value = "int")]
    from: PolyFormat,

    /// Notation of printed polynomials (int, hex, bin, alg)
    #[arg(long, global = true, default_value = "int")]
    to: PolyFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Print (and optionally save) the next COUNT outputs from SEED
    Run {
        /// Initial state
        #[arg(long, env = "GF2E_PRNG_SEED", default_value = "478163327")]
        seed: String,

        /// Number of outputs
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Directory to write the stream to instead of only printing it
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Apply one full recurrence step
    Step {
        /// 31-bit input polynomial
        value: String,
    },

    /// Compute a(x)p(x) + c(x) without reduction
    Affine {
        /// 31-bit input polynomial
        value: String,
    },

    /// Reduce a 35-bit polynomial modulo h(x)
    Reduce {
        /// 35-bit input polynomial
        value: String,
    },

    /// Jump STEPS states ahead of SEED
    Jump {
        /// Initial state
        #[arg(long, env = "GF2E_PRNG_SEED", default_value = "478163327")]
        seed: String,

        /// Number of steps to skip
        #[arg(long)]
        steps: u64,
    },

    /// Convert a polynomial between notations
    Format {
        /// Polynomial to convert
        value: String,
    },

    /// Write a conformance vector file
    Vectors {
        /// Output path
        #[arg(long)]
        out: PathBuf,

        /// Number of random vectors to append
        #[arg(long, default_value_t = 0)]
        random: usize,

        /// Seed of the RNG that draws random vector inputs
        #[arg(long, default_value_t = 42)]
        rng_seed: u64,

        /// Leave out the golden vectors
        #[arg(long)]
        no_golden: bool,
    },

    /// Check a conformance vector file
    Verify {
        /// Vector file to check
        file: PathBuf,
    },

    /// Exhaustively check a block of states in parallel
    Sweep {
        /// First state of the block
        #[arg(long, default_value = "0")]
        start: String,

        /// Number of states
        #[arg(long, default_value_t = 1 << 20)]
        len: u32,
    },
}

fn read_state(text: &str, format: PolyFormat) -> anyhow::Result<u32> {
    let value = parse_poly(text, format)?;
    Ok(check_seed(value)?)
}

fn read_wide(text: &str, format: PolyFormat) -> anyhow::Result<u64> {
    let value = parse_poly(text, format)?;
    Ok(check_wide(value)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gf2e_prng=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let show = |value: u64| format_poly(value, cli.to);

    match &cli.command {
        Commands::Run {
            seed,
            count,
            out_dir,
        } => {
            let seed = read_state(seed, cli.from)?;
            let values: Vec<u32> = Generator::new(seed)?.take(*count).collect();
            for value in &values {
                println!("{}", show(u64::from(*value)));
            }
            if let Some(dir) = out_dir {
                let path = write_sequence(dir, "sequence", 0, seed, &values, cli.to)
                    .with_context(|| format!("writing sequence to {}", dir.display()))?;
                info!(path = %path.display(), count, "sequence written");
            }
        }
        Commands::Step { value } => {
            let p = read_state(value, cli.from)?;
            println!("{}", show(u64::from(step(p))));
        }
        Commands::Affine { value } => {
            let p = read_state(value, cli.from)?;
            println!("{}", show(affine(p)));
        }
        Commands::Reduce { value } => {
            let y = read_wide(value, cli.from)?;
            println!("{}", show(u64::from(reduce(y))));
        }
        Commands::Jump { seed, steps } => {
            let mut prng = Generator::new(read_state(seed, cli.from)?)?;
            println!("{}", show(u64::from(prng.jump(*steps))));
        }
        Commands::Format { value } => {
            println!("{}", show(parse_poly(value, cli.from)?));
        }
        Commands::Vectors {
            out,
            random,
            rng_seed,
            no_golden,
        } => {
            let mut vectors = if *no_golden {
                Vec::new()
            } else {
                golden_vectors()
            };
            vectors.extend(random_vectors(*rng_seed, *random));
            if vectors.is_empty() {
                bail!("no vectors selected; drop --no-golden or pass --random N");
            }
            write_vector_file(out, vectors)?;
        }
        Commands::Verify { file } => {
            let contents = read_vector_file(file)
                .with_context(|| format!("loading {}", file.display()))?;
            let report = verify_vectors(&contents.vectors)?;
            for mismatch in &report.mismatches {
                eprintln!(
                    "vector {} ({}): expected {}, computed {}",
                    mismatch.index,
                    mismatch.op,
                    show(mismatch.expected),
                    show(mismatch.actual)
                );
            }
            let checked = report.into_result()?;
            println!("{checked} vectors verified");
        }
        Commands::Sweep { start, len } => {
            let start = read_state(start, cli.from)?;
            let report = gf2e_prng::sweep::sweep(start, *len)?;
            if !report.passed() {
                bail!(
                    "{} of {} states failed, first: {:?}",
                    report.failed,
                    report.len,
                    report.failures
                );
            }
            println!("{} states verified from {}", report.len, show(u64::from(start)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_argument_rejects_36_bit_input() {
        assert_eq!(read_wide("7041284509", PolyFormat::Int).unwrap(), 7_041_284_509);
        assert!(read_wide("x^35 + 1", PolyFormat::Alg).is_err());
        let err = read_wide("1099511627781", PolyFormat::Int).unwrap_err();
        assert_eq!(err.to_string(), "input 1099511627781 does not fit in 35 bits");
    }

    #[test]
    fn test_state_argument_rejects_32_bit_input() {
        assert_eq!(read_state("0x7fffffff", PolyFormat::Hex).unwrap(), 0x7FFF_FFFF);
        assert!(read_state("2147483648", PolyFormat::Int).is_err());
    }
}
