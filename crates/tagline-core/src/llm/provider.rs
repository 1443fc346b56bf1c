//! LLM provider trait and request/response types.
//!
//! Defines the interface that all caption providers implement, plus the
//! factory that creates the right provider from CLI flags and config.

use crate::config::LlmConfig;
use crate::error::CaptionError;
use crate::prompt::build_caption_prompt;
use crate::types::{CaptionMode, PrefixType};
use async_trait::async_trait;
use base64::Engine;
use std::time::Duration;

/// Base64-encoded image ready to send to an LLM API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and an extension-derived format
    /// string (e.g., "jpeg", "png", "webp").
    pub fn from_bytes(bytes: &[u8], format: &str) -> Self {
        let media_type = match format {
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "tiff" => "image/tiff",
            other => {
                tracing::warn!("Unknown image format '{other}', defaulting to image/jpeg");
                "image/jpeg"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// A request to caption one image.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The image to caption
    pub image: ImageInput,
    /// Text prompt for the model
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl LlmRequest {
    /// Build a caption request for an image with the batch's prefix
    /// parameters.
    pub fn caption_image(
        image: ImageInput,
        prefix: &str,
        prefix_type: PrefixType,
        mode: CaptionMode,
        filename_max_len: usize,
    ) -> Self {
        Self {
            image,
            prompt: build_caption_prompt(prefix, prefix_type, mode, filename_max_len),
            max_tokens: 300,
            temperature: 0.3,
        }
    }
}

/// The response from an LLM caption call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated caption text
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all caption providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn LlmProvider>` for dynamic dispatch).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging (e.g., "openai", "ollama").
    fn name(&self) -> &str;

    /// Check whether the provider is configured and reachable.
    async fn is_available(&self) -> bool;

    /// Generate a caption for the given request.
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, CaptionError>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

/// Decode an HTTP response body, replacing undecodable byte sequences with
/// U+FFFD instead of failing the task.
pub(crate) fn decode_body_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the appropriate provider from CLI flags and config.
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an LLM provider based on provider name, config, and optional
    /// model override.
    pub fn create(
        provider: &str,
        config: &LlmConfig,
        model_override: Option<&str>,
    ) -> Result<Box<dyn LlmProvider>, CaptionError> {
        match provider {
            "openai" => {
                let cfg = config.openai.clone().unwrap_or_default();
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| CaptionError::Llm {
                    message: "OpenAI API key not set. Set OPENAI_API_KEY env var.".to_string(),
                    status_code: None,
                })?;
                let model = model_override.map(String::from).unwrap_or(cfg.model.clone());
                Ok(Box::new(super::openai::OpenAiProvider::new(
                    &api_key, &model,
                )))
            }
            "anthropic" => {
                let cfg = config.anthropic.clone().unwrap_or_default();
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| CaptionError::Llm {
                    message: "Anthropic API key not set. Set ANTHROPIC_API_KEY env var."
                        .to_string(),
                    status_code: None,
                })?;
                let model = model_override.map(String::from).unwrap_or(cfg.model.clone());
                Ok(Box::new(super::anthropic::AnthropicProvider::new(
                    &api_key, &model,
                )))
            }
            "ollama" => {
                let cfg = config.ollama.clone().unwrap_or_default();
                let model = model_override.map(String::from).unwrap_or(cfg.model.clone());
                Ok(Box::new(super::ollama::OllamaProvider::new(
                    &cfg.endpoint,
                    &model,
                )))
            }
            other => Err(CaptionError::Llm {
                message: format!("Unknown LLM provider: {other}"),
                status_code: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_input_from_bytes_jpeg() {
        let input = ImageInput::from_bytes(&[0xFF, 0xD8, 0xFF], "jpeg");
        assert_eq!(input.media_type, "image/jpeg");
        assert!(!input.data.is_empty());
    }

    #[test]
    fn test_image_input_from_bytes_tiff() {
        let input = ImageInput::from_bytes(&[0x49, 0x49, 0x2A], "tiff");
        assert_eq!(input.media_type, "image/tiff");
    }

    #[test]
    fn test_image_input_unknown_format_falls_back_to_jpeg() {
        let input = ImageInput::from_bytes(&[1, 2, 3], "xyz");
        assert_eq!(input.media_type, "image/jpeg");
    }

    #[test]
    fn test_image_input_data_url() {
        let input = ImageInput::from_bytes(&[1, 2, 3], "png");
        let url = input.data_url();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_caption_image_builds_prompt() {
        let image = ImageInput::from_bytes(&[1, 2, 3], "jpeg");
        let request = LlmRequest::caption_image(
            image,
            "cat",
            PrefixType::Subject,
            CaptionMode::TextFile,
            255,
        );
        assert!(request.prompt.contains("prefix: cat"));
        assert_eq!(request.max_tokens, 300);
    }

    #[test]
    fn test_decode_body_lossy_repairs_invalid_utf8() {
        let bytes = [b'a', 0xFF, b'b'];
        let repaired = decode_body_lossy(&bytes);
        assert_eq!(repaired, "a\u{FFFD}b");
    }

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        let config = crate::config::LlmConfig::default();
        let err = match LlmProviderFactory::create("caption-cloud", &config, None) {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };
        assert!(err.to_string().contains("Unknown LLM provider"));
    }

    #[test]
    fn test_factory_ollama_needs_no_key() {
        let config = crate::config::LlmConfig::default();
        let provider = LlmProviderFactory::create("ollama", &config, Some("llava")).unwrap();
        assert_eq!(provider.name(), "ollama");
    }
}
