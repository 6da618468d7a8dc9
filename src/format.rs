//! Text notations for binary polynomials.
//!
//! Four notations are supported: decimal (`17`), hexadecimal (`0x11`),
//! binary (`0b10001`) and algebraic (`x^4 + 1`).  Parsing ignores whitespace;
//! rendering produces the canonical spelling of each notation.

use std::fmt;
use std::str::FromStr;

use crate::error::PrngError;
use crate::poly::bit_positions;

/// Notation used to read or write a polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolyFormat {
    /// Decimal integer.
    #[default]
    Int,
    /// Hexadecimal integer with `0x` prefix.
    Hex,
    /// Binary integer with `0b` prefix.
    Bin,
    /// Sum of powers of `x`, highest first.
    Alg,
}

impl PolyFormat {
    /// Lower-case name of the notation.
    pub fn name(&self) -> &'static str {
        match self {
            PolyFormat::Int => "int",
            PolyFormat::Hex => "hex",
            PolyFormat::Bin => "bin",
            PolyFormat::Alg => "alg",
        }
    }
}

impl fmt::Display for PolyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolyFormat {
    type Err = PrngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" => Ok(PolyFormat::Int),
            "hex" => Ok(PolyFormat::Hex),
            "bin" => Ok(PolyFormat::Bin),
            "alg" => Ok(PolyFormat::Alg),
            other => Err(PrngError::UnknownFormat(other.to_string())),
        }
    }
}

fn parse_error(input: &str, format: PolyFormat, reason: impl Into<String>) -> PrngError {
    PrngError::Parse {
        input: input.to_string(),
        format: format.name(),
        reason: reason.into(),
    }
}

fn parse_radix(
    input: &str,
    compact: &str,
    prefix: &str,
    radix: u32,
    format: PolyFormat,
) -> Result<u64, PrngError> {
    let lower = compact.to_ascii_lowercase();
    let digits = lower.strip_prefix(prefix).unwrap_or(&lower);
    u64::from_str_radix(digits, radix).map_err(|err| parse_error(input, format, err.to_string()))
}

fn parse_term(input: &str, term: &str) -> Result<u32, PrngError> {
    match term {
        "1" => Ok(0),
        "x" => Ok(1),
        _ => {
            let exponent = term.strip_prefix("x^").ok_or_else(|| {
                parse_error(input, PolyFormat::Alg, format!("bad term {term:?}"))
            })?;
            let exponent: u32 = exponent.parse().map_err(|_| {
                parse_error(input, PolyFormat::Alg, format!("bad exponent in {term:?}"))
            })?;
            if exponent >= u64::BITS {
                return Err(parse_error(
                    input,
                    PolyFormat::Alg,
                    format!("degree {exponent} exceeds 63"),
                ));
            }
            Ok(exponent)
        }
    }
}

/// Parses `input` written in `format` into its bit-vector representation.
///
/// Decimal input may carry a leading minus sign, which is dropped.  In
/// algebraic notation a repeated term sets its coefficient once rather than
/// cancelling; `"0"` denotes the zero polynomial.
///
/// # Examples
///
/// ```
/// use gf2e_prng::{parse_poly, PolyFormat};
///
/// assert_eq!(parse_poly("x^4 + 1", PolyFormat::Alg).unwrap(), 17);
/// assert_eq!(parse_poly("0x11", PolyFormat::Hex).unwrap(), 17);
/// ```
pub fn parse_poly(input: &str, format: PolyFormat) -> Result<u64, PrngError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(parse_error(input, format, "empty input"));
    }
    match format {
        PolyFormat::Int => {
            let digits = compact.strip_prefix('-').unwrap_or(&compact);
            digits
                .parse::<u64>()
                .map_err(|err| parse_error(input, format, err.to_string()))
        }
        PolyFormat::Hex => parse_radix(input, &compact, "0x", 16, format),
        PolyFormat::Bin => parse_radix(input, &compact, "0b", 2, format),
        PolyFormat::Alg => {
            if compact == "0" {
                return Ok(0);
            }
            compact.split('+').try_fold(0u64, |acc, term| {
                parse_term(input, term).map(|exp| acc | (1u64 << exp))
            })
        }
    }
}

/// Renders `poly` in the requested notation.
///
/// # Examples
///
/// ```
/// use gf2e_prng::{format_poly, PolyFormat};
///
/// assert_eq!(format_poly(11, PolyFormat::Alg), "x^3 + x + 1");
/// assert_eq!(format_poly(11, PolyFormat::Bin), "0b1011");
/// ```
pub fn format_poly(poly: u64, format: PolyFormat) -> String {
    match format {
        PolyFormat::Int => poly.to_string(),
        PolyFormat::Hex => format!("{poly:#x}"),
        PolyFormat::Bin => format!("{poly:#b}"),
        PolyFormat::Alg => {
            if poly == 0 {
                return "0".to_string();
            }
            bit_positions(poly)
                .into_iter()
                .rev()
                .map(|exp| match exp {
                    0 => "1".to_string(),
                    1 => "x".to_string(),
                    _ => format!("x^{exp}"),
                })
                .collect::<Vec<_>>()
                .join(" + ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::MODULUS;

    #[test]
    fn test_modulus_renders_algebraically() {
        assert_eq!(
            format_poly(MODULUS, PolyFormat::Alg),
            "x^31 + x^13 + x^8 + x^3 + 1"
        );
        assert_eq!(
            parse_poly("x^31 + x^13 + x^8 + x^3 + 1", PolyFormat::Alg).unwrap(),
            MODULUS
        );
    }

    #[test]
    fn test_every_notation_reads_back() {
        for format in [PolyFormat::Int, PolyFormat::Hex, PolyFormat::Bin, PolyFormat::Alg] {
            for value in [0u64, 1, 2, 17, 478_163_327, 7_860_332_174] {
                let text = format_poly(value, format);
                assert_eq!(parse_poly(&text, format).unwrap(), value, "{format}: {text}");
            }
        }
    }

    #[test]
    fn test_lenient_inputs() {
        assert_eq!(parse_poly(" 1 7 ", PolyFormat::Int).unwrap(), 17);
        assert_eq!(parse_poly("-17", PolyFormat::Int).unwrap(), 17);
        assert_eq!(parse_poly("11", PolyFormat::Hex).unwrap(), 17);
        assert_eq!(parse_poly("0B10001", PolyFormat::Bin).unwrap(), 17);
        assert_eq!(parse_poly("x+x+1", PolyFormat::Alg).unwrap(), 3);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_poly("", PolyFormat::Int).is_err());
        assert!(parse_poly("0x1g", PolyFormat::Hex).is_err());
        assert!(parse_poly("0b102", PolyFormat::Bin).is_err());
        assert!(parse_poly("x^64", PolyFormat::Alg).is_err());
        assert!(parse_poly("y^2 + 1", PolyFormat::Alg).is_err());
        assert!(parse_poly("x^2 ++ 1", PolyFormat::Alg).is_err());
    }

    #[test]
    fn test_format_names() {
        assert_eq!("ALG".parse::<PolyFormat>().unwrap(), PolyFormat::Alg);
        assert!(matches!(
            "oct".parse::<PolyFormat>(),
            Err(PrngError::UnknownFormat(_))
        ));
    }
}
