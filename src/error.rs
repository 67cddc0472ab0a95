//! Error handling for overdub
//!
//! All fallible operations in the crate return [`Result`] with a single
//! error enum, so callers match on one type regardless of which subsystem
//! failed.

use thiserror::Error;

/// Result type alias for overdub operations
pub type Result<T> = std::result::Result<T, OverdubError>;

/// Main error type for overdub operations
#[derive(Error, Debug)]
pub enum OverdubError {
    // Merge errors
    #[error("Cannot merge an empty set of inputs")]
    EmptyInput,

    // Clip errors
    #[error(
        "Clip mismatch: {reason} (base: {base_channels}ch @ {base_rate} Hz, \
         other: {other_channels}ch @ {other_rate} Hz)"
    )]
    ClipMismatch {
        reason: String,
        base_channels: u16,
        base_rate: u32,
        other_channels: u16,
        other_rate: u32,
    },

    #[error("Unsupported bit depth: {0} (supported: 8, 16, 32)")]
    UnsupportedBitDepth(u16),

    #[error("Invalid clip: {reason}")]
    InvalidClip { reason: String },

    // Compression errors
    #[error("Missing dependency for {backend} backend: {message}")]
    MissingDependency {
        backend: &'static str,
        message: &'static str,
    },

    #[error("Compression error: {reason}")]
    Compression { reason: String },

    // Subprocess errors
    #[error("Transcoder exited with {status}: {stderr}")]
    Transcoder { status: String, stderr: String },

    #[error("Required tool not found on PATH: {tool}")]
    ToolNotFound { tool: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // WAV codec errors
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}
