//! Remove empty filter implementation.
//!
//! # Examples
//!
//! ```
//! use ulasan::analysis::token_filter::Filter;
//! use ulasan::analysis::token_filter::remove_empty::RemoveEmptyFilter;
//! use ulasan::analysis::token::Token;
//!
//! let filter = RemoveEmptyFilter::new();
//! let tokens = vec![
//!     Token::new("harga", 0),
//!     Token::new("", 1),         // Will be removed
//!     Token::new("mahal", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "harga");
//! assert_eq!(result[1].text, "mahal");
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that removes empty and stopped tokens from the stream.
///
/// Typically the last filter of a pipeline, cleaning up after filters that
/// emptied or stopped tokens.
#[derive(Clone, Debug, Default)]
pub struct RemoveEmptyFilter;

impl RemoveEmptyFilter {
    /// Create a new remove empty filter.
    pub fn new() -> Self {
        RemoveEmptyFilter
    }
}

impl Filter for RemoveEmptyFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered: Vec<Token> = tokens
            .filter(|token| !token.is_stopped() && !token.text.trim().is_empty())
            .collect();

        Ok(Box::new(filtered.into_iter()))
    }

    fn name(&self) -> &'static str {
        "remove_empty"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_empty_filter() {
        let filter = RemoveEmptyFilter::new();
        let tokens = vec![
            Token::new("servis", 0),
            Token::new("", 1),
            Token::new(" ", 2),
            Token::new("lambat", 3).stop(),
            Token::new("ramah", 4),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "servis");
        assert_eq!(result[1].text, "ramah");
    }
}
