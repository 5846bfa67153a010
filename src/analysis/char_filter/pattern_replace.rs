use regex::Regex;

use super::CharFilter;
use crate::error::{Result, UlasanError};

/// Pattern matching `http(s)://` and `www.` links.
pub const URL_PATTERN: &str = r"(?i)(?:https?://|www\.)\S+";

/// Pattern matching `@mentions` and `#hashtags`.
pub const MENTION_PATTERN: &str = r"[@#]\w+";

/// Pattern matching everything that is neither a letter nor whitespace.
pub const NON_LETTER_PATTERN: &str = r"[^\p{L}\s]+";

/// A char filter that replaces characters matching a regex pattern.
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| UlasanError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    /// A filter that blanks out URLs.
    pub fn urls() -> Result<Self> {
        Self::new(URL_PATTERN, " ")
    }

    /// A filter that blanks out `@mentions` and `#hashtags`.
    pub fn mentions() -> Result<Self> {
        Self::new(MENTION_PATTERN, " ")
    }

    /// A filter that blanks out digits, punctuation and symbols.
    pub fn non_letters() -> Result<Self> {
        Self::new(NON_LETTER_PATTERN, " ")
    }
}

impl std::fmt::Debug for PatternReplaceCharFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternReplaceCharFilter")
            .field("pattern", &self.pattern.as_str())
            .field("replacement", &self.replacement)
            .finish()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}
