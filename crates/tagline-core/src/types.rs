//! Domain types shared across the captioning pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the user-supplied prefix names, which changes how the prompt is
/// phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixType {
    /// The prefix names a person or object to describe in detail
    Subject,
    /// The prefix names an artistic style the caption should reflect
    Style,
}

impl std::fmt::Display for PrefixType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixType::Subject => write!(f, "subject"),
            PrefixType::Style => write!(f, "style"),
        }
    }
}

/// Per-batch output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionMode {
    /// Copy the image to `{prefix}{index:02}{ext}` and write the caption to
    /// a `{prefix}{index:02}.txt` sidecar file
    TextFile,
    /// Copy the image to a sanitized version of the caption itself
    FileName,
}

impl std::fmt::Display for CaptionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptionMode::TextFile => write!(f, "text_file"),
            CaptionMode::FileName => write!(f, "file_name"),
        }
    }
}

/// One unit of batch work: a single image plus the parameters its caption
/// depends on. Created once by the coordinator from the sorted directory
/// listing and consumed exactly once.
#[derive(Debug, Clone)]
pub struct ImageTask {
    /// Full path to the source image
    pub source_path: PathBuf,
    /// 1-based position in the sorted listing; keys all output filenames
    pub index: usize,
    /// User-supplied prefix, included in the caption and output names
    pub prefix: String,
    /// Whether the prefix names a subject or a style
    pub prefix_type: PrefixType,
}

impl ImageTask {
    pub fn new(source_path: PathBuf, index: usize, prefix: &str, prefix_type: PrefixType) -> Self {
        Self {
            source_path,
            index,
            prefix: prefix.to_string(),
            prefix_type,
        }
    }

    /// Lowercased extension of the source file, with leading dot
    /// (e.g. ".jpg"), or empty if the file has none.
    pub fn extension(&self) -> String {
        self.source_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default()
    }
}

/// The outputs produced for one successfully captioned image.
#[derive(Debug, Clone, Serialize)]
pub struct CaptionRecord {
    /// Original image path
    pub source_path: PathBuf,
    /// Name of the copied image in the output directory
    pub new_filename: String,
    /// Path of the sidecar text file, if the mode produces one
    pub sidecar_path: Option<PathBuf>,
    /// The (repaired) caption text as returned by the model
    pub caption: String,
    /// Model identifier that produced the caption
    pub model: String,
    /// Round-trip latency of the winning attempt in milliseconds
    pub latency_ms: u64,
}
