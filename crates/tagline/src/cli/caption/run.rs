//! Batch execution with progress reporting and a final summary.

use indicatif::{ProgressBar, ProgressStyle};
use tagline_core::TaskOutcome;

use super::CaptionContext;

/// Run the batch, updating a progress bar as results land (completion order)
/// and printing per-item outcomes. Returns `(succeeded, failed)`.
pub async fn run_with_progress(ctx: CaptionContext) -> (usize, usize) {
    let total = ctx.tasks.len() as u64;
    let progress = create_progress_bar(total);
    let start_time = std::time::Instant::now();

    let pb = progress.clone();
    let (succeeded, failed) = ctx
        .captioner
        .run_batch(&ctx.tasks, move |outcome| {
            match outcome {
                TaskOutcome::Completed(record) => match &record.sidecar_path {
                    Some(sidecar) => pb.println(format!(
                        "  {} -> {}  (caption: {})",
                        record.source_path.display(),
                        record.new_filename,
                        sidecar.display()
                    )),
                    None => pb.println(format!(
                        "  {} -> {}",
                        record.source_path.display(),
                        record.new_filename
                    )),
                },
                TaskOutcome::Failed { path, reason } => {
                    tracing::error!("Failed: {:?} - {reason}", path);
                    pb.println(format!("  FAILED {}: {reason}", path.display()));
                }
            }
            pb.inc(1);
            let elapsed = start_time.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                let rate = pb.position() as f64 / elapsed;
                pb.set_message(format!("{:.1} img/sec", rate));
            }
        })
        .await;

    progress.finish_and_clear();
    print_summary(succeeded, failed, start_time.elapsed());
    (succeeded, failed)
}

/// Create a progress bar for batch captioning.
fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary block after the batch completes.
fn print_summary(succeeded: usize, failed: usize, elapsed: std::time::Duration) {
    let total = succeeded + failed;
    let rate = if elapsed.as_secs_f64() > 0.0 {
        total as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Captioned:    {:>8}", succeeded);
    if failed > 0 {
        eprintln!("    Failed:       {:>8}", failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", total);
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}
