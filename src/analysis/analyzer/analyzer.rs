//! Core analyzer trait definition.
//!
//! An [`Analyzer`] is the complete text processing pipeline:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 … Filter N → Token Stream
//! ```
//!
//! # Available Implementations
//!
//! - [`PipelineAnalyzer`](super::PipelineAnalyzer) - Custom char filter, tokenizer and filter chains
//! - [`IndonesianAnalyzer`](super::IndonesianAnalyzer) - Preset for informal Indonesian reviews
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use ulasan::analysis::analyzer::Analyzer;
//! use ulasan::analysis::token::{Token, TokenStream};
//! use ulasan::error::Result;
//!
//! struct SplitAnalyzer;
//!
//! impl Analyzer for SplitAnalyzer {
//!     fn analyze(&self, text: &str) -> Result<TokenStream> {
//!         let tokens: Vec<Token> = text
//!             .split_whitespace()
//!             .enumerate()
//!             .map(|(i, word)| Token::new(word, i))
//!             .collect();
//!         Ok(Box::new(tokens.into_iter()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "split"
//!     }
//! }
//!
//! assert_eq!(SplitAnalyzer.analyze("a b").unwrap().count(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so a single analyzer can be shared by
/// the normalizer and the vectorizer of a model bundle.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
