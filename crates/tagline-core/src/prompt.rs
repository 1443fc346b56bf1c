//! Caption prompt construction.
//!
//! The prompt asks for a caption that mentions the user's prefix naturally,
//! biased toward subject description or style description, and — in filename
//! mode — constrained to text usable as a filename.

use crate::types::{CaptionMode, PrefixType};

/// Build the captioning instruction for one image.
pub fn build_caption_prompt(
    prefix: &str,
    prefix_type: PrefixType,
    mode: CaptionMode,
    filename_max_len: usize,
) -> String {
    let mut prompt = String::from(
        "You are a professional image captioner. You are given an image and will provide \
         a caption for it. You should always provide a caption that is relevant to the \
         image. This caption should capture aspects of the subject and setting of the \
         image. ",
    );

    if !prefix.is_empty() {
        prompt.push_str(&format!(
            "Please make sure the given prefix: {prefix} is included in the caption \
             naturally. The prefix indicates a {prefix_type}. "
        ));

        match prefix_type {
            PrefixType::Subject => prompt.push_str(&format!(
                "Focus on describing the {prefix} in detail. Include things such as \
                 expressions, poses, camera angles, lighting, surroundings, distinctive \
                 features, etc. Example: A photo of {prefix}. A playful golden retriever \
                 frolicking in a sunlit park. "
            )),
            PrefixType::Style => prompt.push_str(&format!(
                "Ensure the caption reflects the artistic style of {prefix}. Example: An \
                 image in the style of {prefix}. A vibrant anime-style illustration of a \
                 determined schoolgirl with large expressive eyes and colorful hair. "
            )),
        }
    }

    prompt.push_str(
        "Balance: Strive for a balance between detail and conciseness. The captions \
         should be detailed enough to capture the essential characteristics and \
         distinctions in the images, but not so lengthy that they introduce unnecessary \
         complexity. ",
    );

    if mode == CaptionMode::FileName {
        prompt.push_str(&format!(
            "IMPORTANT: Your caption will be used as a file name. It MUST be \
             {filename_max_len} characters or less, including spaces. Do not use any \
             characters that are invalid in file names (/, \\, :, *, ?, \", <, >, |). \
             Make sure the caption is concise but still descriptive and includes the \
             prefix."
        ));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_prefix_and_type() {
        let prompt = build_caption_prompt("milo", PrefixType::Subject, CaptionMode::TextFile, 255);
        assert!(prompt.contains("prefix: milo"));
        assert!(prompt.contains("indicates a subject"));
        assert!(prompt.contains("describing the milo in detail"));
    }

    #[test]
    fn test_style_prompt_uses_style_phrasing() {
        let prompt =
            build_caption_prompt("ukiyo-e", PrefixType::Style, CaptionMode::TextFile, 255);
        assert!(prompt.contains("artistic style of ukiyo-e"));
        assert!(!prompt.contains("describing the ukiyo-e in detail"));
    }

    #[test]
    fn test_empty_prefix_omits_prefix_instructions() {
        let prompt = build_caption_prompt("", PrefixType::Subject, CaptionMode::TextFile, 255);
        assert!(!prompt.contains("prefix:"));
        assert!(prompt.contains("professional image captioner"));
    }

    #[test]
    fn test_filename_mode_adds_constraint() {
        let prompt = build_caption_prompt("cat", PrefixType::Subject, CaptionMode::FileName, 255);
        assert!(prompt.contains("used as a file name"));
        assert!(prompt.contains("255 characters or less"));
    }

    #[test]
    fn test_text_file_mode_has_no_filename_constraint() {
        let prompt = build_caption_prompt("cat", PrefixType::Subject, CaptionMode::TextFile, 255);
        assert!(!prompt.contains("file name"));
    }
}
