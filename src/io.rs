//! Minimal file helpers for exporting generated streams.

use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::format::{format_poly, PolyFormat};

/// Writes a generated stream to `base_dir/prefix_index.txt`.
///
/// The first line records the seed; every following line holds one output in
/// the requested notation, in generation order.
pub fn write_sequence(
    base_dir: impl AsRef<Path>,
    prefix: &str,
    index: usize,
    seed: u32,
    values: &[u32],
    format: PolyFormat,
) -> io::Result<PathBuf> {
    let dir = base_dir.as_ref();
    create_dir_all(dir)?;
    let filename = format!("{}_{:04}.txt", prefix, index);
    let path = dir.join(filename);
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "# seed {}", format_poly(u64::from(seed), format))?;
    for &value in values {
        writer.write_all(format_poly(u64::from(value), format).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(path)
}
