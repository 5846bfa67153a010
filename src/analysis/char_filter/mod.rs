//! Char filter implementations for text normalization.
//!
//! Char filters rewrite the raw string before it reaches the tokenizer. They
//! are used to strip noise (URLs, mentions, digits) and to repair elongated
//! words typed in informal reviews.
//!
//! # Available Filters
//!
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`repeated_char::RepeatedCharFilter`] - Collapses runs of one character

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod pattern_replace;
pub mod repeated_char;

pub use pattern_replace::PatternReplaceCharFilter;
pub use repeated_char::RepeatedCharFilter;
