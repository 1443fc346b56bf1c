//! The `tagline caption` command for captioning a folder of images.

mod run;
mod setup;
pub mod types;

pub use types::{Mode, PrefixKind, Provider};

use clap::Args;
use std::path::PathBuf;
use tagline_core::{BatchOptions, Captioner, Config, ImageTask, OutputPolicy};

use run::run_with_progress;
use setup::setup_captioner;

/// Arguments for the `caption` command.
#[derive(Args, Debug)]
pub struct CaptionArgs {
    /// Folder containing the images to caption
    #[arg(required = true)]
    pub input: PathBuf,

    /// Folder for captioned outputs (defaults to the input folder)
    pub output: Option<PathBuf>,

    /// Text prepended to generated filenames and woven into the prompt
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Whether the prefix names a subject or a style
    #[arg(long, value_enum, default_value = "subject")]
    pub prefix_type: PrefixKind,

    /// Output mode: numbered copy + sidecar, or caption-as-filename
    #[arg(short, long, value_enum, default_value = "text-file")]
    pub mode: Mode,

    /// Number of parallel caption workers
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Caption provider
    #[arg(long, value_enum, default_value = "openai")]
    pub provider: Provider,

    /// Model name (provider-specific override)
    #[arg(long)]
    pub model: Option<String>,
}

/// Everything assembled by setup_captioner().
pub(crate) struct CaptionContext {
    pub captioner: Captioner,
    pub tasks: Vec<ImageTask>,
}

/// Execute the caption command.
///
/// Exits non-zero if any image in the batch failed (the run itself still
/// drains every task).
pub async fn execute(args: CaptionArgs, config: Config) -> anyhow::Result<()> {
    let ctx = setup_captioner(&args, &config)?;

    if ctx.tasks.is_empty() {
        tracing::warn!("No supported image files found in {:?}", args.input);
        return Ok(());
    }
    tracing::info!("Found {} image(s) to caption", ctx.tasks.len());

    let (succeeded, failed) = run_with_progress(ctx).await;

    if failed > 0 {
        anyhow::bail!("{failed} of {} images failed", succeeded + failed);
    }
    Ok(())
}

pub(crate) fn batch_options(args: &CaptionArgs, config: &Config) -> BatchOptions {
    BatchOptions {
        // Remote caption calls are I/O-bound; cap the pool regardless of
        // host core count
        parallel: args
            .parallel
            .unwrap_or(config.processing.parallel_workers)
            .min(8),
        timeout_ms: config.limits.llm_timeout_ms,
        retry_attempts: config.retry.attempts,
        retry_delay_ms: config.retry.delay_ms,
        max_file_size_mb: config.limits.max_file_size_mb,
    }
}

pub(crate) fn output_policy(
    args: &CaptionArgs,
    config: &Config,
    output_dir: PathBuf,
) -> OutputPolicy {
    OutputPolicy {
        output_dir,
        mode: args.mode.into(),
        filename_max_len: config.output.filename_max_len,
        collapse_whitespace: config.output.collapse_whitespace,
    }
}
