//! Caption setup: input validation, provider construction, task creation.

use tagline_core::{Captioner, Config, ImageLister, ImageTask, LlmProviderFactory};

use super::{batch_options, output_policy, CaptionArgs, CaptionContext};

/// Validate paths, build the provider, and assemble everything needed to run
/// the batch.
///
/// Fails before any captioning work starts if the input is not a directory or
/// the provider cannot be constructed (e.g. missing API key).
pub fn setup_captioner(args: &CaptionArgs, config: &Config) -> anyhow::Result<CaptionContext> {
    let input = Config::expand_path(&args.input.to_string_lossy());

    // Enumerate first: a bad input path must abort before any filesystem
    // mutation or network use
    let files = ImageLister::new(&config.processing).list(&input)?;

    // In-place captioning when no output folder was given
    let output_dir = args
        .output
        .as_ref()
        .map(|out| Config::expand_path(&out.to_string_lossy()))
        .unwrap_or_else(|| input.clone());
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)?;
        tracing::info!("Created output folder {:?}", output_dir);
    }

    let provider =
        LlmProviderFactory::create(&args.provider.to_string(), &config.llm, args.model.as_deref())?;
    tracing::debug!("Using {} provider", provider.name());

    let tasks: Vec<ImageTask> = files
        .into_iter()
        .enumerate()
        .map(|(i, path)| ImageTask::new(path, i + 1, &args.prefix, args.prefix_type.into()))
        .collect();

    let captioner = Captioner::new(
        provider,
        output_policy(args, config, output_dir),
        batch_options(args, config),
    );

    Ok(CaptionContext { captioner, tasks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args_for(input: PathBuf) -> CaptionArgs {
        CaptionArgs {
            input,
            output: None,
            prefix: "cat".to_string(),
            prefix_type: super::super::PrefixKind::Subject,
            mode: super::super::Mode::TextFile,
            parallel: None,
            provider: super::super::Provider::Ollama, // needs no API key
            model: None,
        }
    }

    #[test]
    fn test_setup_rejects_missing_input() {
        let args = args_for(PathBuf::from("/definitely/not/a/dir"));
        let err = match setup_captioner(&args, &Config::default()) {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("Not a directory"));
    }

    #[test]
    fn test_setup_assigns_one_based_indices_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"x").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();

        let args = args_for(dir.path().to_path_buf());
        let ctx = setup_captioner(&args, &Config::default()).unwrap();

        assert_eq!(ctx.tasks.len(), 2);
        assert_eq!(ctx.tasks[0].index, 1);
        assert_eq!(ctx.tasks[0].source_path.file_name().unwrap(), "a.jpg");
        assert_eq!(ctx.tasks[1].index, 2);
        assert_eq!(ctx.tasks[1].source_path.file_name().unwrap(), "b.png");
        assert_eq!(ctx.tasks[0].prefix, "cat");
    }

    #[test]
    fn test_setup_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        let out = dir.path().join("captioned");

        let mut args = args_for(dir.path().to_path_buf());
        args.output = Some(out.clone());
        setup_captioner(&args, &Config::default()).unwrap();

        assert!(out.is_dir());
    }
}
