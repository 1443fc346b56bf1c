//! Image enumeration for a single input directory.
//!
//! Listing order is load-bearing: the 1-based position of each file in the
//! sorted listing becomes its task index, which keys every output filename.

use std::path::{Path, PathBuf};

use crate::config::ProcessingConfig;
use crate::error::CaptionError;

/// Enumerates image files in a directory.
pub struct ImageLister {
    formats: Vec<String>,
}

impl ImageLister {
    /// Create a lister recognizing the configured extensions.
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            formats: config
                .supported_formats
                .iter()
                .map(|f| f.to_lowercase())
                .collect(),
        }
    }

    /// List the image files directly inside `dir`, sorted lexicographically
    /// by filename.
    ///
    /// Fails with [`CaptionError::NotADirectory`] if `dir` is missing or not
    /// a directory. Subdirectories and non-image entries are skipped;
    /// unreadable entries are logged and skipped rather than failing the
    /// whole listing.
    pub fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, CaptionError> {
        if !dir.is_dir() {
            return Err(CaptionError::NotADirectory(dir.to_path_buf()));
        }

        let entries = std::fs::read_dir(dir).map_err(|e| CaptionError::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory entry: {e}");
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && self.is_supported(&path) {
                files.push(path);
            }
        }

        // Sort by filename, not full path, so index assignment is stable and
        // independent of how the directory itself was spelled
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Check if a file has a recognized image extension (case-insensitive).
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.formats.iter().any(|fmt| *fmt == ext_lower)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessingConfig;

    fn lister() -> ImageLister {
        ImageLister::new(&ProcessingConfig::default())
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_is_supported() {
        let lister = lister();
        assert!(lister.is_supported(Path::new("test.jpg")));
        assert!(lister.is_supported(Path::new("test.JPG")));
        assert!(lister.is_supported(Path::new("test.jpeg")));
        assert!(lister.is_supported(Path::new("test.png")));
        assert!(lister.is_supported(Path::new("test.gif")));
        assert!(lister.is_supported(Path::new("test.bmp")));
        assert!(lister.is_supported(Path::new("test.tiff")));
        assert!(lister.is_supported(Path::new("test.webp")));
        assert!(!lister.is_supported(Path::new("test.txt")));
        assert!(!lister.is_supported(Path::new("test.pdf")));
        assert!(!lister.is_supported(Path::new("noextension")));
    }

    #[test]
    fn test_list_rejects_non_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("image.jpg");
        std::fs::write(&file, b"x").unwrap();

        let err = lister().list(&file).unwrap_err();
        assert!(matches!(err, CaptionError::NotADirectory(_)));

        let err = lister().list(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, CaptionError::NotADirectory(_)));
    }

    #[test]
    fn test_list_only_non_images_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "data.json");
        touch(dir.path(), "archive.tar.gz");

        let files = lister().list(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_list_filters_and_sorts_lexicographically() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.png");
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "c.TIFF");
        touch(dir.path(), "readme.md");
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let files = lister().list(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.png", "c.TIFF"]);
    }

    #[test]
    fn test_list_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "top.jpg");
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        touch(&sub, "nested.jpg");

        let files = lister().list(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "top.jpg");
    }

    #[test]
    fn test_list_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "z.webp");
        touch(dir.path(), "m.gif");
        touch(dir.path(), "a.bmp");

        let first = lister().list(dir.path()).unwrap();
        let second = lister().list(dir.path()).unwrap();
        assert_eq!(first, second);
    }
}
