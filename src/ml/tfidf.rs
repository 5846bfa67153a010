//! TF-IDF vectorizer for text feature extraction.

use std::collections::HashMap;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::LowercaseFilter;
use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::{Result, UlasanError};

/// TF-IDF vectorizer for text feature extraction.
///
/// `fit` learns a vocabulary of at most `max_features` terms and their
/// smoothed inverse document frequencies; `transform` maps texts to
/// L2-normalized vectors of vocabulary size. Terms missing from the
/// vocabulary are ignored.
#[derive(Clone)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Terms ordered by index.
    terms: Vec<String>,
    /// Inverse document frequency for each term.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Analyzer for term extraction.
    analyzer: Arc<dyn Analyzer>,
    fitted: bool,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .field("fitted", &self.fitted)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: HashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
            fitted: false,
        }
    }

    /// Create a vectorizer extracting lowercased terms of two or more word
    /// characters.
    pub fn standard() -> Result<Self> {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::terms()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("tfidf_terms");
        Ok(Self::new(Arc::new(analyzer)))
    }

    /// Fit the vectorizer on a corpus, keeping the `max_features` most
    /// frequent terms.
    ///
    /// On error the vectorizer keeps its previous state.
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S], max_features: usize) -> Result<()> {
        if max_features == 0 {
            return Err(UlasanError::configuration(
                "max_features must be a positive integer",
            ));
        }
        if corpus.is_empty() {
            return Err(UlasanError::configuration(
                "cannot fit a vectorizer on an empty corpus",
            ));
        }

        let mut term_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();

        for doc in corpus {
            let mut seen: AHashMap<String, ()> = AHashMap::new();
            for token in self.tokenize(doc.as_ref())? {
                *term_frequency.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.clone(), ()).is_none() {
                    *document_frequency.entry(token).or_insert(0) += 1;
                }
            }
        }

        // Most frequent first, ties broken lexicographically.
        let mut candidates: Vec<(String, usize)> = term_frequency.into_iter().collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        candidates.truncate(max_features);

        let mut terms: Vec<String> = candidates.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_documents = corpus.len();
        let idf: Vec<f64> = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term).copied().unwrap_or(0);
                // IDF = log((N + 1) / (df + 1)) + 1
                ((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        debug!(
            "fitted tf-idf vocabulary: {} terms from {} documents (max_features={})",
            terms.len(),
            n_documents,
            max_features
        );

        self.vocabulary = vocabulary;
        self.terms = terms;
        self.idf = idf;
        self.n_documents = n_documents;
        self.fitted = true;

        Ok(())
    }

    /// Transform texts into TF-IDF feature vectors.
    pub fn transform<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Vec<f64>>> {
        self.ensure_fitted()?;
        texts
            .iter()
            .map(|text| self.transform_fitted(text.as_ref()))
            .collect()
    }

    /// Transform a single text into a TF-IDF feature vector.
    pub fn transform_one(&self, text: &str) -> Result<Vec<f64>> {
        self.ensure_fitted()?;
        self.transform_fitted(text)
    }

    /// Fit on `corpus`, then transform it.
    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        corpus: &[S],
        max_features: usize,
    ) -> Result<Vec<Vec<f64>>> {
        self.fit(corpus, max_features)?;
        self.transform(corpus)
    }

    fn transform_fitted(&self, text: &str) -> Result<Vec<f64>> {
        let mut features = vec![0.0; self.vocabulary.len()];

        for token in self.tokenize(text)? {
            if let Some(&idx) = self.vocabulary.get(&token) {
                features[idx] += 1.0;
            }
        }

        for (idx, value) in features.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        Ok(features)
    }

    fn ensure_fitted(&self) -> Result<()> {
        if self.fitted {
            Ok(())
        } else {
            Err(UlasanError::not_fitted(
                "TfIdfVectorizer.transform called before fit",
            ))
        }
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check whether `fit` has succeeded at least once.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Index of a vocabulary term.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Vocabulary terms ordered by feature index.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// IDF weights ordered by feature index.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "avanza bahan bakar boros banget".to_string(),
            "mesin halus bahan bakar irit".to_string(),
            "harga mahal servis lambat".to_string(),
        ]
    }

    #[test]
    fn test_tfidf_vectorizer() {
        let mut vectorizer = TfIdfVectorizer::standard().unwrap();
        vectorizer.fit(&corpus(), 5000).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 12);

        let features = vectorizer.transform(&["bahan bakar irit"]).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].len(), vectorizer.vocabulary_size());

        let norm: f64 = features[0].iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vocabulary_is_sorted_and_idf_smoothed() {
        let mut vectorizer = TfIdfVectorizer::standard().unwrap();
        vectorizer.fit(&corpus(), 5000).unwrap();

        let terms = vectorizer.terms();
        assert!(terms.windows(2).all(|w| w[0] < w[1]));

        // "bahan" appears in 2 of 3 documents, "harga" in 1.
        let bahan = vectorizer.idf()[vectorizer.term_index("bahan").unwrap()];
        let harga = vectorizer.idf()[vectorizer.term_index("harga").unwrap()];
        assert!((bahan - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((harga - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut vectorizer = TfIdfVectorizer::standard().unwrap();
        vectorizer.fit(&corpus(), 2).unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 2);
        assert_eq!(vectorizer.terms(), &["bahan".to_string(), "bakar".to_string()]);
    }

    #[test]
    fn test_unknown_terms_give_zero_vector() {
        let mut vectorizer = TfIdfVectorizer::standard().unwrap();
        vectorizer.fit(&corpus(), 5000).unwrap();

        let features = vectorizer.transform_one("sama sekali berbeda").unwrap();
        assert_eq!(features.len(), 12);
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_fit_errors_leave_state_untouched() {
        let mut vectorizer = TfIdfVectorizer::standard().unwrap();
        assert!(matches!(
            vectorizer.fit(&corpus(), 0),
            Err(UlasanError::Configuration(_))
        ));
        let empty: Vec<String> = Vec::new();
        assert!(matches!(
            vectorizer.fit(&empty, 10),
            Err(UlasanError::Configuration(_))
        ));
        assert!(!vectorizer.is_fitted());

        vectorizer.fit(&corpus(), 5000).unwrap();
        assert!(vectorizer.fit(&corpus(), 0).is_err());
        assert_eq!(vectorizer.vocabulary_size(), 12);
    }

    #[test]
    fn test_transform_before_fit() {
        let vectorizer = TfIdfVectorizer::standard().unwrap();
        assert!(matches!(
            vectorizer.transform(&["irit"]),
            Err(UlasanError::NotFitted(_))
        ));
    }

    #[test]
    fn test_fit_transform() {
        let mut vectorizer = TfIdfVectorizer::standard().unwrap();
        let rows = vectorizer.fit_transform(&corpus(), 5000).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 12));
    }
}
