//! tagline-core - Embeddable batch image captioning library.
//!
//! Takes a directory of images and, for each one, asks a hosted vision
//! language model for a descriptive caption, writing the result as a sidecar
//! text file or as the image's new filename.
//!
//! # Architecture
//!
//! ```text
//! List directory → one ImageTask per file → bounded concurrent caption calls
//!                → copy image + write caption → per-task outcome
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use tagline_core::{
//!     BatchOptions, CaptionMode, Captioner, Config, ImageLister, ImageTask,
//!     LlmProviderFactory, OutputPolicy, PrefixType,
//! };
//!
//! #[tokio::main]
//! async fn main() -> tagline_core::Result<()> {
//!     let config = Config::load()?;
//!     let provider = LlmProviderFactory::create("openai", &config.llm, None)?;
//!
//!     let files = ImageLister::new(&config.processing).list("./photos".as_ref())?;
//!     let tasks: Vec<ImageTask> = files
//!         .into_iter()
//!         .enumerate()
//!         .map(|(i, p)| ImageTask::new(p, i + 1, "cat", PrefixType::Subject))
//!         .collect();
//!
//!     let policy = OutputPolicy {
//!         output_dir: "./captioned".into(),
//!         mode: CaptionMode::TextFile,
//!         filename_max_len: config.output.filename_max_len,
//!         collapse_whitespace: config.output.collapse_whitespace,
//!     };
//!     let captioner = Captioner::new(provider, policy, BatchOptions::default());
//!     let (ok, failed) = captioner.run_batch(&tasks, |outcome| {
//!         println!("{outcome:?}");
//!     }).await;
//!     println!("{ok} captioned, {failed} failed");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod batch;
pub mod config;
pub mod discovery;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod types;
pub mod writer;

// Re-exports for convenient access
pub use batch::{BatchOptions, Captioner, TaskOutcome};
pub use config::Config;
pub use discovery::ImageLister;
pub use error::{CaptionError, CaptionResult, ConfigError, Result, TaglineError};
pub use llm::{LlmProvider, LlmProviderFactory, LlmRequest, LlmResponse};
pub use types::{CaptionMode, CaptionRecord, ImageTask, PrefixType};
pub use writer::OutputPolicy;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
