//! Output writing for captioned images.
//!
//! Two per-batch modes: sidecar (copy the image under a numbered name and
//! write the caption to a companion `.txt` file) and filename (copy the
//! image under a sanitized version of the caption itself).
//!
//! Sources are always copied, never renamed: originals stay untouched so a
//! partially failed run can simply be rerun.

use std::path::PathBuf;

use crate::error::CaptionError;
use crate::types::{CaptionMode, ImageTask};

/// Characters that are invalid in filenames on at least one supported
/// platform.
const ILLEGAL_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Per-batch output settings.
#[derive(Debug, Clone)]
pub struct OutputPolicy {
    /// Directory all outputs are written to
    pub output_dir: PathBuf,
    /// Sidecar vs filename mode
    pub mode: CaptionMode,
    /// Maximum generated filename length in characters, extension included
    pub filename_max_len: usize,
    /// Collapse whitespace runs to underscores in caption-derived names
    pub collapse_whitespace: bool,
}

/// Filesystem artifacts produced for one captioned image.
#[derive(Debug, Clone)]
pub struct WrittenOutput {
    /// Name of the copied image in the output directory
    pub new_filename: String,
    /// Path of the sidecar text file, if the mode produces one
    pub sidecar_path: Option<PathBuf>,
}

impl OutputPolicy {
    /// Write the outputs for one task and its caption.
    pub fn write(&self, task: &ImageTask, caption: &str) -> Result<WrittenOutput, CaptionError> {
        match self.mode {
            CaptionMode::TextFile => self.write_sidecar(task, caption),
            CaptionMode::FileName => self.write_as_filename(task, caption),
        }
    }

    /// Sidecar mode: `{prefix}{index:02}{ext}` image copy plus
    /// `{prefix}{index:02}.txt` holding the caption verbatim.
    fn write_sidecar(&self, task: &ImageTask, caption: &str) -> Result<WrittenOutput, CaptionError> {
        let stem = format!("{}{:02}", task.prefix, task.index);
        let new_filename = format!("{stem}{}", task.extension());
        let image_path = self.output_dir.join(&new_filename);
        let sidecar_path = self.output_dir.join(format!("{stem}.txt"));

        copy_image(task, &image_path)?;
        std::fs::write(&sidecar_path, caption).map_err(|e| CaptionError::Output {
            path: sidecar_path.clone(),
            message: format!("Failed to write caption file: {e}"),
        })?;

        Ok(WrittenOutput {
            new_filename,
            sidecar_path: Some(sidecar_path),
        })
    }

    /// Filename mode: the sanitized caption becomes the image's new name.
    fn write_as_filename(
        &self,
        task: &ImageTask,
        caption: &str,
    ) -> Result<WrittenOutput, CaptionError> {
        let ext = task.extension();
        let stem_budget = self.filename_max_len.saturating_sub(ext.chars().count());
        let stem = sanitize_filename(caption, self.collapse_whitespace, stem_budget);

        if stem.is_empty() {
            return Err(CaptionError::Output {
                path: task.source_path.clone(),
                message: "Caption sanitized to an empty filename".to_string(),
            });
        }

        let new_filename = format!("{stem}{ext}");
        let image_path = self.output_dir.join(&new_filename);
        copy_image(task, &image_path)?;

        Ok(WrittenOutput {
            new_filename,
            sidecar_path: None,
        })
    }
}

/// Copy the source image to its output location.
fn copy_image(task: &ImageTask, dest: &std::path::Path) -> Result<(), CaptionError> {
    std::fs::copy(&task.source_path, dest).map_err(|e| CaptionError::Output {
        path: dest.to_path_buf(),
        message: format!("Failed to copy {}: {e}", task.source_path.display()),
    })?;
    Ok(())
}

/// Strip filename-illegal characters, optionally collapse whitespace to
/// underscores, and truncate to `max_chars` characters.
pub fn sanitize_filename(caption: &str, collapse_whitespace: bool, max_chars: usize) -> String {
    let stripped: String = caption
        .trim()
        .chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c) && !c.is_control())
        .collect();

    let joined = if collapse_whitespace {
        stripped
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    } else {
        stripped
    };

    joined.chars().take(max_chars).collect()
}
