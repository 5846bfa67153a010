//! Stop filter implementation.
//!
//! Removes function words that carry no aspect or sentiment signal. The
//! default list targets informal Indonesian reviews. Negations and
//! intensifiers ("tidak", "kurang", "banget") must stay out of it: they flip
//! or scale the polarity of the surrounding words.
//!
//! # Examples
//!
//! ```
//! use ulasan::analysis::token_filter::Filter;
//! use ulasan::analysis::token_filter::stop::StopFilter;
//! use ulasan::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![
//!     Token::new("mesin", 0),
//!     Token::new("nya", 1),
//!     Token::new("tidak", 2),
//!     Token::new("halus", 3),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(result, vec!["mesin", "tidak", "halus"]);
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default Indonesian stop words list.
const DEFAULT_INDONESIAN_STOP_WORDS: &[&str] = &[
    "ada", "adalah", "agar", "aja", "aku", "akan", "anda", "atau", "bagi", "bahwa", "begitu",
    "dalam", "dan", "dari", "deh", "dengan", "di", "dia", "dong", "gitu", "hal", "ia", "ini",
    "itu", "jadi", "juga", "kalau", "kami", "kamu", "karena", "ke", "kita", "kok", "lah", "mereka",
    "nya", "oleh", "pada", "para", "saat", "saja", "saya", "se", "sebuah", "sedang", "seperti",
    "sih", "sudah", "supaya", "telah", "tersebut", "untuk", "ya", "yaitu", "yang",
];

/// Default Indonesian stop words as a HashSet.
pub static DEFAULT_INDONESIAN_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_INDONESIAN_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from the token stream.
///
/// Matching is exact, so the filter belongs after lowercasing. With
/// `remove_stopped(false)` stop words stay in the stream marked as stopped.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
    /// Whether to remove stopped tokens entirely or just mark them as stopped
    remove_stopped: bool,
}

impl StopFilter {
    /// Create a new stop filter with the default Indonesian stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_INDONESIAN_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
            remove_stopped: true,
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(Into::into).collect())
    }

    /// Set whether to remove stopped tokens entirely or only mark them.
    pub fn remove_stopped(mut self, remove: bool) -> Self {
        self.remove_stopped = remove;
        self
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word list is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = Arc::clone(&self.stop_words);
        let remove_stopped = self.remove_stopped;

        let filtered: Vec<Token> = tokens
            .filter_map(|token| {
                if token.is_stopped() || !stop_words.contains(&token.text) {
                    Some(token)
                } else if remove_stopped {
                    None
                } else {
                    Some(token.stop())
                }
            })
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
