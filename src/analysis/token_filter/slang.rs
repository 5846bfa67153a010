//! Slang normalization filter.
//!
//! Maps informal spellings and abbreviations to their standard form, token by
//! token. A replacement may contain spaces ("bbm" → "bahan bakar"); the
//! normalizer joins tokens with spaces, so the vectorizer sees two terms.
//!
//! # Examples
//!
//! ```
//! use ulasan::analysis::token_filter::Filter;
//! use ulasan::analysis::token_filter::slang::SlangFilter;
//! use ulasan::analysis::token::Token;
//!
//! let filter = SlangFilter::new();
//! let tokens = vec![Token::new("bbm", 0), Token::new("boros", 1), Token::new("bgt", 2)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(result, vec!["bahan bakar", "boros", "banget"]);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default Indonesian slang dictionary (informal form, standard form).
const DEFAULT_INDONESIAN_SLANG: &[(&str, &str)] = &[
    ("ak", "aku"),
    ("bbm", "bahan bakar"),
    ("bgt", "banget"),
    ("bngt", "banget"),
    ("blm", "belum"),
    ("bnyk", "banyak"),
    ("dgn", "dengan"),
    ("dr", "dari"),
    ("ga", "tidak"),
    ("gak", "tidak"),
    ("gk", "tidak"),
    ("gx", "tidak"),
    ("jg", "juga"),
    ("kalo", "kalau"),
    ("klo", "kalau"),
    ("krn", "karena"),
    ("kurg", "kurang"),
    ("mantab", "mantap"),
    ("mantul", "mantap"),
    ("nggak", "tidak"),
    ("ngga", "tidak"),
    ("org", "orang"),
    ("pake", "pakai"),
    ("sdh", "sudah"),
    ("sm", "sama"),
    ("tdk", "tidak"),
    ("tp", "tapi"),
    ("trs", "terus"),
    ("udah", "sudah"),
    ("udh", "sudah"),
    ("utk", "untuk"),
    ("yg", "yang"),
];

/// Default Indonesian slang dictionary as a HashMap.
pub static DEFAULT_INDONESIAN_SLANG_MAP: LazyLock<HashMap<String, String>> =
    LazyLock::new(|| {
        DEFAULT_INDONESIAN_SLANG
            .iter()
            .map(|&(from, to)| (from.to_string(), to.to_string()))
            .collect()
    });

/// A filter that replaces whole tokens found in a slang dictionary.
///
/// Matching is exact and case-sensitive; place it after lowercasing.
#[derive(Clone, Debug)]
pub struct SlangFilter {
    dictionary: Arc<HashMap<String, String>>,
}

impl SlangFilter {
    /// Create a slang filter with the default Indonesian dictionary.
    pub fn new() -> Self {
        Self::with_dictionary(DEFAULT_INDONESIAN_SLANG_MAP.clone())
    }

    /// Create a slang filter with a custom dictionary.
    pub fn with_dictionary(dictionary: HashMap<String, String>) -> Self {
        SlangFilter {
            dictionary: Arc::new(dictionary),
        }
    }

    /// Look up the standard form of a token.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.dictionary.get(word).map(String::as_str)
    }
}

impl Default for SlangFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for SlangFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let dictionary = Arc::clone(&self.dictionary);

        let filtered: Vec<Token> = tokens
            .map(|token| {
                if token.is_stopped() {
                    return token;
                }
                match dictionary.get(&token.text) {
                    Some(standard) => {
                        let standard = standard.clone();
                        token.with_text(standard)
                    }
                    None => token,
                }
            })
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "slang"
    }
}
