//! Batch coordinator for concurrent image captioning.
//!
//! Fans tasks out over a semaphore-bounded pool of tokio tasks. Results are
//! delivered via a callback as they complete (completion order, not
//! submission order), so the CLI can update progress in real time. Every
//! failure is converted into a typed outcome for its own task; one bad image
//! never takes down the batch.

use crate::error::CaptionError;
use crate::llm::{retry, ImageInput, LlmProvider, LlmRequest};
use crate::types::{CaptionRecord, ImageTask};
use crate::writer::OutputPolicy;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Configuration for the batch coordinator.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum concurrent caption calls
    pub parallel: usize,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum retries per image
    pub retry_attempts: u32,
    /// Base backoff delay in milliseconds
    pub retry_delay_ms: u64,
    /// Maximum source file size in megabytes
    pub max_file_size_mb: u64,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: 4,
            timeout_ms: 60_000,
            retry_attempts: 3,
            retry_delay_ms: 1000,
            max_file_size_mb: 100,
        }
    }
}

/// Result of captioning a single image.
#[derive(Debug)]
pub enum TaskOutcome {
    Completed(CaptionRecord),
    Failed { path: PathBuf, reason: String },
}

/// Concurrent captioning coordinator.
pub struct Captioner {
    provider: Arc<dyn LlmProvider>,
    policy: OutputPolicy,
    options: BatchOptions,
}

impl Captioner {
    pub fn new(provider: Box<dyn LlmProvider>, policy: OutputPolicy, options: BatchOptions) -> Self {
        Self {
            provider: Arc::from(provider),
            policy,
            options,
        }
    }

    /// Caption a batch of image tasks.
    ///
    /// Spawns one tokio task per image, bounded by a semaphore. Calls
    /// `on_result` for each completed task so the CLI can report progress as
    /// results land. Output files are keyed by each task's fixed index, so
    /// completion order does not affect correctness.
    ///
    /// Returns `(succeeded, failed)` counts after all tasks have drained.
    pub async fn run_batch<F>(&self, tasks: &[ImageTask], on_result: F) -> (usize, usize)
    where
        F: Fn(TaskOutcome) + Send + Sync + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.options.parallel));
        let on_result = Arc::new(on_result);
        let mut handles = Vec::with_capacity(tasks.len());

        for task in tasks {
            let permit = semaphore.clone().acquire_owned().await;
            if permit.is_err() {
                tracing::warn!("Caption semaphore closed unexpectedly, stopping batch");
                break;
            }
            let permit = permit.unwrap();

            let provider = self.provider.clone();
            let policy = self.policy.clone();
            let options = self.options.clone();
            let on_result = on_result.clone();
            let task = task.clone();

            let handle = tokio::spawn(async move {
                let outcome = caption_single(&provider, &policy, &task, &options).await;
                let success = matches!(&outcome, TaskOutcome::Completed(_));
                drop(permit); // Release concurrency permit before callback
                on_result(outcome);
                success
            });

            handles.push(handle);
        }

        // Wait for all tasks and count results
        let mut succeeded = 0usize;
        let mut failed = 0usize;

        for handle in handles {
            match handle.await {
                Ok(true) => succeeded += 1,
                Ok(false) => failed += 1,
                Err(e) => {
                    tracing::error!("Caption task panicked: {e}");
                    failed += 1;
                }
            }
        }

        (succeeded, failed)
    }
}

/// Caption a single image with timeout and retry, then write its outputs.
async fn caption_single(
    provider: &Arc<dyn LlmProvider>,
    policy: &OutputPolicy,
    task: &ImageTask,
    options: &BatchOptions,
) -> TaskOutcome {
    match caption_single_inner(provider, policy, task, options).await {
        Ok(record) => TaskOutcome::Completed(record),
        Err(e) => TaskOutcome::Failed {
            path: task.source_path.clone(),
            reason: e.to_string(),
        },
    }
}

async fn caption_single_inner(
    provider: &Arc<dyn LlmProvider>,
    policy: &OutputPolicy,
    task: &ImageTask,
    options: &BatchOptions,
) -> Result<CaptionRecord, CaptionError> {
    // Size guard before uploading anything
    let metadata = tokio::fs::metadata(&task.source_path)
        .await
        .map_err(|e| CaptionError::Read {
            path: task.source_path.clone(),
            source: e,
        })?;
    let size_mb = metadata.len() / (1024 * 1024);
    if size_mb > options.max_file_size_mb {
        return Err(CaptionError::FileTooLarge {
            path: task.source_path.clone(),
            size_mb,
            max_mb: options.max_file_size_mb,
        });
    }

    let image_bytes =
        tokio::fs::read(&task.source_path)
            .await
            .map_err(|e| CaptionError::Read {
                path: task.source_path.clone(),
                source: e,
            })?;

    let format = task.extension().trim_start_matches('.').to_string();
    let image_input = ImageInput::from_bytes(&image_bytes, &format);
    let request = LlmRequest::caption_image(
        image_input,
        &task.prefix,
        task.prefix_type,
        policy.mode,
        policy.filename_max_len,
    );

    // Retry loop for the remote call
    let mut last_error = CaptionError::Llm {
        message: "No attempts made".to_string(),
        status_code: None,
    };
    for attempt in 0..=options.retry_attempts {
        if attempt > 0 {
            let delay = retry::backoff_duration(attempt - 1, options.retry_delay_ms);
            tracing::debug!(
                "Retry {attempt}/{} for {:?} after {delay:?}",
                options.retry_attempts,
                task.source_path
            );
            tokio::time::sleep(delay).await;
        }

        match tokio::time::timeout(
            std::time::Duration::from_millis(options.timeout_ms),
            provider.generate(&request),
        )
        .await
        {
            Ok(Ok(response)) => {
                let written = policy.write(task, &response.text)?;
                return Ok(CaptionRecord {
                    source_path: task.source_path.clone(),
                    new_filename: written.new_filename,
                    sidecar_path: written.sidecar_path,
                    caption: response.text,
                    model: response.model,
                    latency_ms: response.latency_ms,
                });
            }
            Ok(Err(e)) => {
                let retryable = retry::is_retryable(&e);
                last_error = e;
                if !retryable {
                    break;
                }
            }
            Err(_) => {
                // Timeouts are retryable
                last_error = CaptionError::Timeout {
                    path: task.source_path.clone(),
                    timeout_ms: options.timeout_ms,
                };
            }
        }
    }

    Err(last_error)
}
