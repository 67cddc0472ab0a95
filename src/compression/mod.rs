//! Compression backend registry
//!
//! Format-name dispatch over a closed set of backends. The zstd backend is
//! optional; when its library is compiled out, the dispatch arm reports a
//! missing dependency at call time, every time it is called. Availability is
//! never checked at startup and the failure is not cached.

mod gzip;
mod zstd;

use std::fmt;
use std::str::FromStr;

use crate::error::Result;

/// A supported compression backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compressor {
    Gzip,
    Zstd,
}

impl fmt::Display for Compressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compressor::Gzip => write!(f, "gzip"),
            Compressor::Zstd => write!(f, "zstd"),
        }
    }
}

impl FromStr for Compressor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gzip" => Ok(Compressor::Gzip),
            "zstd" => Ok(Compressor::Zstd),
            other => Err(format!("unknown compressor: {other}")),
        }
    }
}

/// Compress `content` with the named backend.
///
/// `level` is backend-specific (gzip 0..=9, zstd 1..=22); `None` picks the
/// backend's default.
pub fn compress(compressor: Compressor, content: &[u8], level: Option<i32>) -> Result<Vec<u8>> {
    match compressor {
        Compressor::Gzip => gzip::compress(content, level),
        Compressor::Zstd => zstd::compress(content, level),
    }
}

/// Decompress `content` with the named backend.
pub fn decompress(compressor: Compressor, content: &[u8]) -> Result<Vec<u8>> {
    match compressor {
        Compressor::Gzip => gzip::decompress(content),
        Compressor::Zstd => zstd::decompress(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &[u8] = b"the same phrase over and over and over and over again";

    #[test]
    fn gzip_round_trip() {
        let packed = compress(Compressor::Gzip, PAYLOAD, None).unwrap();
        assert_eq!(decompress(Compressor::Gzip, &packed).unwrap(), PAYLOAD);
    }

    #[test]
    fn gzip_level_out_of_range_is_clamped() {
        let packed = compress(Compressor::Gzip, PAYLOAD, Some(99)).unwrap();
        assert_eq!(decompress(Compressor::Gzip, &packed).unwrap(), PAYLOAD);
    }

    #[test]
    fn gzip_rejects_garbage() {
        assert!(decompress(Compressor::Gzip, b"not a gzip stream").is_err());
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn zstd_round_trip() {
        let packed = compress(Compressor::Zstd, PAYLOAD, Some(3)).unwrap();
        assert_eq!(decompress(Compressor::Zstd, &packed).unwrap(), PAYLOAD);
    }

    #[cfg(not(feature = "zstd"))]
    #[test]
    fn zstd_without_backend_reports_missing_dependency_each_call() {
        use crate::error::OverdubError;

        // The failure must not be cached; every call reports it afresh.
        for _ in 0..2 {
            let result = compress(Compressor::Zstd, PAYLOAD, None);
            assert!(matches!(
                result,
                Err(OverdubError::MissingDependency { backend: "zstd", .. })
            ));
        }
        assert!(matches!(
            decompress(Compressor::Zstd, PAYLOAD),
            Err(OverdubError::MissingDependency { backend: "zstd", .. })
        ));
    }

    #[test]
    fn names_round_trip() {
        for c in [Compressor::Gzip, Compressor::Zstd] {
            assert_eq!(c.to_string().parse::<Compressor>(), Ok(c));
        }
        assert!("lz4".parse::<Compressor>().is_err());
    }
}
