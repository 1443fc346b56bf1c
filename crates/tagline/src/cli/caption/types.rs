//! CLI enum types for the caption command: prefix type, output mode, provider.

use clap::ValueEnum;
use tagline_core::{CaptionMode, PrefixType};

/// What the prefix names, which changes prompt phrasing.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum PrefixKind {
    /// The prefix names a person or object (default)
    #[default]
    Subject,
    /// The prefix names an artistic style
    Style,
}

impl From<PrefixKind> for PrefixType {
    fn from(kind: PrefixKind) -> Self {
        match kind {
            PrefixKind::Subject => PrefixType::Subject,
            PrefixKind::Style => PrefixType::Style,
        }
    }
}

/// How captions are written out.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum Mode {
    /// Numbered image copy plus a .txt sidecar holding the caption (default)
    #[default]
    #[value(alias = "text_file")]
    TextFile,
    /// The sanitized caption becomes the image's filename
    #[value(alias = "file_name")]
    FileName,
}

impl From<Mode> for CaptionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::TextFile => CaptionMode::TextFile,
            Mode::FileName => CaptionMode::FileName,
        }
    }
}

/// Supported caption providers.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum Provider {
    /// OpenAI API (default)
    #[default]
    Openai,
    /// Anthropic API
    Anthropic,
    /// Local Ollama instance
    Ollama,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Openai => write!(f, "openai"),
            Provider::Anthropic => write!(f, "anthropic"),
            Provider::Ollama => write!(f, "ollama"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_kind_maps_to_core() {
        assert_eq!(PrefixType::from(PrefixKind::Subject), PrefixType::Subject);
        assert_eq!(PrefixType::from(PrefixKind::Style), PrefixType::Style);
    }

    #[test]
    fn test_mode_maps_to_core() {
        assert_eq!(CaptionMode::from(Mode::TextFile), CaptionMode::TextFile);
        assert_eq!(CaptionMode::from(Mode::FileName), CaptionMode::FileName);
    }

    #[test]
    fn test_provider_display() {
        assert_eq!(Provider::Openai.to_string(), "openai");
        assert_eq!(Provider::Anthropic.to_string(), "anthropic");
        assert_eq!(Provider::Ollama.to_string(), "ollama");
    }
}
