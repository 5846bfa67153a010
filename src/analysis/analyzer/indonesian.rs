//! Analyzer preset for informal Indonesian reviews.
//!
//! # Pipeline
//!
//! 1. PatternReplaceCharFilter (URLs)
//! 2. PatternReplaceCharFilter (`@mentions`, `#hashtags`)
//! 3. PatternReplaceCharFilter (digits, punctuation, symbols)
//! 4. RepeatedCharFilter (runs of 3+)
//! 5. UnicodeWordTokenizer
//! 6. LowercaseFilter
//! 7. SlangFilter
//! 8. StopFilter (Indonesian)
//! 9. RemoveEmptyFilter
//!
//! # Examples
//!
//! ```
//! use ulasan::analysis::analyzer::{Analyzer, IndonesianAnalyzer};
//!
//! let analyzer = IndonesianAnalyzer::new().unwrap();
//! let tokens: Vec<String> = analyzer
//!     .analyze("Avanza bahan bakar nya boros bgt!!!")
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(tokens, vec!["avanza", "bahan", "bakar", "boros", "banget"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::{PatternReplaceCharFilter, RepeatedCharFilter};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{LowercaseFilter, RemoveEmptyFilter, SlangFilter, StopFilter};
use crate::analysis::tokenizer::UnicodeWordTokenizer;
use crate::error::Result;

/// Analyzer tuned for short, informal Indonesian product reviews.
#[derive(Debug, Clone)]
pub struct IndonesianAnalyzer {
    inner: PipelineAnalyzer,
    name: &'static str,
}

impl IndonesianAnalyzer {
    /// Create a new Indonesian analyzer with default settings.
    pub fn new() -> Result<Self> {
        let name = "indonesian";
        Ok(IndonesianAnalyzer {
            inner: Self::base()?
                .add_filter(Arc::new(StopFilter::new()))
                .add_filter(Arc::new(RemoveEmptyFilter::new()))
                .with_name(name),
            name,
        })
    }

    /// Create a new Indonesian analyzer without stop word filtering.
    pub fn without_stop_words() -> Result<Self> {
        let name = "indonesian_no_stop";
        Ok(IndonesianAnalyzer {
            inner: Self::base()?
                .add_filter(Arc::new(RemoveEmptyFilter::new()))
                .with_name(name),
            name,
        })
    }

    fn base() -> Result<PipelineAnalyzer> {
        Ok(PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::urls()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::mentions()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::non_letters()?))
            .add_char_filter(Arc::new(RepeatedCharFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(SlangFilter::new())))
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for IndonesianAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
