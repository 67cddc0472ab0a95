//! Gzip backend via flate2

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::Result;

/// Gzip levels run 0..=9; out-of-range requests are clamped.
pub fn compress(content: &[u8], level: Option<i32>) -> Result<Vec<u8>> {
    let level = level.unwrap_or(6).clamp(0, 9) as u32;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(content)?;
    Ok(encoder.finish()?)
}

pub fn decompress(content: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(content);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
