//! Text analysis module for ulasan.
//!
//! This module provides tokenization, char and token filtering, analysis
//! pipelines, and the [`TextNormalizer`] that turns a raw review into the
//! cleaned text the vectorizer is fitted on.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, IndonesianAnalyzer, PipelineAnalyzer};
pub use normalizer::TextNormalizer;
pub use token::{Token, TokenStream};
