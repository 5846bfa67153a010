//! Raw review text to normalized text.
//!
//! # Examples
//!
//! ```
//! use ulasan::analysis::TextNormalizer;
//!
//! let normalizer = TextNormalizer::indonesian().unwrap();
//! assert_eq!(
//!     normalizer.normalize("Avanza bahan bakar nya boros banget"),
//!     "avanza bahan bakar boros banget"
//! );
//! assert_eq!(normalizer.normalize(""), "");
//! ```

use std::sync::Arc;

use log::warn;

use crate::analysis::analyzer::{Analyzer, IndonesianAnalyzer};
use crate::error::Result;

/// A deterministic text to text transform.
///
/// Runs an analyzer and joins the surviving tokens with single spaces. It
/// holds no learned state, so one instance can serve training and prediction.
#[derive(Clone)]
pub struct TextNormalizer {
    analyzer: Arc<dyn Analyzer>,
}

impl TextNormalizer {
    /// Create a normalizer backed by the given analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        TextNormalizer { analyzer }
    }

    /// Create a normalizer with the [`IndonesianAnalyzer`] preset.
    pub fn indonesian() -> Result<Self> {
        Ok(Self::new(Arc::new(IndonesianAnalyzer::new()?)))
    }

    /// Normalize one text.
    ///
    /// Never fails: an analyzer error is logged and yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        match self.analyzer.analyze(text) {
            Ok(tokens) => tokens
                .map(|token| token.text)
                .collect::<Vec<_>>()
                .join(" "),
            Err(e) => {
                warn!("normalization with {} failed: {e}", self.analyzer.name());
                String::new()
            }
        }
    }

    /// Normalize a batch of texts.
    pub fn normalize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        texts.iter().map(|t| self.normalize(t.as_ref())).collect()
    }

    /// Get the analyzer backing this normalizer.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::TokenStream;
    use crate::error::UlasanError;

    struct FailingAnalyzer;

    impl Analyzer for FailingAnalyzer {
        fn analyze(&self, _text: &str) -> Result<TokenStream> {
            Err(UlasanError::analysis("broken"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let normalizer = TextNormalizer::indonesian().unwrap();
        let text = "Harga MURAH tp servis lamaaa, gak recomended!!";

        let first = normalizer.normalize(text);
        assert_eq!(first, "harga murah tapi servis lama tidak recomended");
        assert_eq!(normalizer.normalize(text), first);
    }

    #[test]
    fn test_normalize_all() {
        let normalizer = TextNormalizer::indonesian().unwrap();
        let out = normalizer.normalize_all(&["Irit!", "  "]);
        assert_eq!(out, vec!["irit".to_string(), String::new()]);
    }

    #[test]
    fn test_analyzer_failure_yields_empty_text() {
        let normalizer = TextNormalizer::new(Arc::new(FailingAnalyzer));
        assert_eq!(normalizer.normalize("apa saja"), "");
    }
}
