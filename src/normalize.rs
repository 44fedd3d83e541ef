use anyhow::{Context, Result};
use regex::Regex;

/// Strips markup out of a single text value: tags and comments are
/// discarded, non-breaking spaces (the `&nbsp;` entity and the raw
/// U+00A0 code point) become ordinary spaces, and the result is
/// trimmed. Malformed markup degrades to plain text rather than
/// failing. Cleaning an already-clean string is a no-op.
pub struct Normalizer {
    comment: Regex,
    tag: Regex,
    nbsp_entity: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            comment: Regex::new(r"(?s)<!--.*?-->").context("failed to compile comment regex")?,
            tag: Regex::new(r"<[^>]*>").context("failed to compile tag regex")?,
            nbsp_entity: Regex::new(r"(?i)&(?:nbsp|#160|#x0*a0);")
                .context("failed to compile nbsp entity regex")?,
        })
    }

    pub fn clean(&self, raw: Option<&str>) -> String {
        let Some(raw) = raw else {
            return String::new();
        };
        if raw.trim().is_empty() {
            return String::new();
        }

        let text = self.comment.replace_all(raw, "");
        let text = self.tag.replace_all(&text, "");
        let text = self.nbsp_entity.replace_all(&text, "\u{00A0}");

        text.replace('\u{00A0}', " ").trim().to_string()
    }
}
