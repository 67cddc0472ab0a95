//! Zstandard backend
//!
//! Available only with the `zstd` cargo feature. Without it, calls fail
//! with a missing-dependency error at call time; nothing fails at startup.

#[cfg(feature = "zstd")]
mod imp {
    use crate::error::{OverdubError, Result};

    pub fn compress(content: &[u8], level: Option<i32>) -> Result<Vec<u8>> {
        zstd::encode_all(content, level.unwrap_or(0)).map_err(|e| OverdubError::Compression {
            reason: e.to_string(),
        })
    }

    pub fn decompress(content: &[u8]) -> Result<Vec<u8>> {
        zstd::decode_all(content).map_err(|e| OverdubError::Compression {
            reason: e.to_string(),
        })
    }
}

#[cfg(not(feature = "zstd"))]
mod imp {
    use crate::error::{OverdubError, Result};

    const MESSAGE: &str = "the `zstd` feature is required to use zstd compression";

    fn missing() -> OverdubError {
        OverdubError::MissingDependency {
            backend: "zstd",
            message: MESSAGE,
        }
    }

    pub fn compress(_content: &[u8], _level: Option<i32>) -> Result<Vec<u8>> {
        Err(missing())
    }

    pub fn decompress(_content: &[u8]) -> Result<Vec<u8>> {
        Err(missing())
    }
}

pub use imp::{compress, decompress};
