//! Error types for the tagline captioning pipeline.
//!
//! Errors are organized by concern: configuration problems abort a run before
//! any work starts, caption errors are scoped to a single image task and
//! never take down sibling tasks.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for tagline operations.
#[derive(Error, Debug)]
pub enum TaglineError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Per-task captioning errors
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors scoped to a single caption task (or to batch setup).
#[derive(Error, Debug)]
pub enum CaptionError {
    /// Input path is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Reading the source image failed
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote model invocation failed
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// Remote call exceeded the per-request timeout
    #[error("Timeout for {} after {timeout_ms}ms", .path.display())]
    Timeout { path: PathBuf, timeout_ms: u64 },

    /// Writing the caption output (image copy or sidecar file) failed
    #[error("Output error for {}: {message}", .path.display())]
    Output { path: PathBuf, message: String },

    /// Source file exceeds the upload size limit
    #[error("File too large: {} ({size_mb}MB > {max_mb}MB)", .path.display())]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },
}

/// Convenience type alias for tagline results.
pub type Result<T> = std::result::Result<T, TaglineError>;

/// Convenience type alias for per-task results.
pub type CaptionResult<T> = std::result::Result<T, CaptionError>;
