//! Binary learners and the one-learner-per-label multi-label classifier.

use std::fmt;

use crate::error::{Result, UlasanError};

pub mod decision_tree;
pub mod logistic_regression;
pub mod multi_label;
pub mod naive_bayes;
pub mod params;
pub mod random_forest;

pub use decision_tree::{DecisionTree, TreeConfig};
pub use logistic_regression::{LogisticConfig, LogisticRegression};
pub use multi_label::MultiLabelClassifier;
pub use naive_bayes::{NaiveBayes, NaiveBayesConfig};
pub use params::ModelParams;
pub use random_forest::{ForestConfig, RandomForest};

/// A learner for one `0`/`1` target column.
pub trait BinaryClassifier: Send + Sync + fmt::Debug {
    /// Fit on feature rows `x` and binary targets `y`.
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()>;

    /// Probability of class `1` for one feature row.
    fn predict_proba(&self, row: &[f64]) -> f64;

    /// Class for one feature row: `1` iff the probability exceeds 0.5.
    fn predict(&self, row: &[f64]) -> u8 {
        u8::from(self.predict_proba(row) > 0.5)
    }

    fn is_fitted(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// A supported learner together with its validated hyperparameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Learner {
    RandomForest(ForestConfig),
    DecisionTree(TreeConfig),
    LogisticRegression(LogisticConfig),
    NaiveBayes(NaiveBayesConfig),
}

impl Learner {
    /// Resolve a learner by display name.
    ///
    /// Matching ignores case, spaces, `_` and `-`, so `"random_forest"` and
    /// `"Random Forest"` are the same learner.
    pub fn from_name(name: &str, params: &ModelParams) -> Result<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "randomforest" => Ok(Learner::RandomForest(ForestConfig::from_params(params)?)),
            "decisiontree" => Ok(Learner::DecisionTree(TreeConfig::from_params(params)?)),
            "logisticregression" => Ok(Learner::LogisticRegression(
                LogisticConfig::from_params(params)?,
            )),
            "naivebayes" => Ok(Learner::NaiveBayes(NaiveBayesConfig::from_params(params)?)),
            _ => Err(UlasanError::unknown_model(format!(
                "'{name}' is not a supported model; expected one of {}",
                SUPPORTED_MODELS.join(", ")
            ))),
        }
    }

    /// Create an unfitted learner for one label column.
    pub fn build(&self) -> Box<dyn BinaryClassifier> {
        match self {
            Learner::RandomForest(config) => Box::new(RandomForest::new(config.clone())),
            Learner::DecisionTree(config) => Box::new(DecisionTree::new(config.clone())),
            Learner::LogisticRegression(config) => {
                Box::new(LogisticRegression::new(config.clone()))
            }
            Learner::NaiveBayes(config) => Box::new(NaiveBayes::new(config.clone())),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Learner::RandomForest(_) => "Random Forest",
            Learner::DecisionTree(_) => "Decision Tree",
            Learner::LogisticRegression(_) => "Logistic Regression",
            Learner::NaiveBayes(_) => "Naive Bayes",
        }
    }
}

/// Display names accepted by [`Learner::from_name`].
pub const SUPPORTED_MODELS: &[&str] = &[
    "Random Forest",
    "Decision Tree",
    "Logistic Regression",
    "Naive Bayes",
];

/// Check a binary training set and return its feature count.
pub(crate) fn check_training_set(x: &[Vec<f64>], y: &[u8]) -> Result<usize> {
    if x.is_empty() {
        return Err(UlasanError::insufficient_data(
            "cannot fit a classifier on zero rows",
        ));
    }
    if x.len() != y.len() {
        return Err(UlasanError::invalid_input(format!(
            "{} feature rows but {} targets",
            x.len(),
            y.len()
        )));
    }
    let n_features = check_feature_rows(x)?;
    if let Some(bad) = y.iter().find(|&&v| v > 1) {
        return Err(UlasanError::invalid_input(format!(
            "targets must be 0 or 1, got {bad}"
        )));
    }
    Ok(n_features)
}

/// Check that all rows share the width of the first one.
pub(crate) fn check_feature_rows(x: &[Vec<f64>]) -> Result<usize> {
    let n_features = x.first().map_or(0, Vec::len);
    if let Some((i, row)) = x.iter().enumerate().find(|(_, r)| r.len() != n_features) {
        return Err(UlasanError::invalid_input(format!(
            "feature row {i} has {} columns, expected {n_features}",
            row.len()
        )));
    }
    Ok(n_features)
}

/// Non-zero entries of each row.
///
/// TF-IDF rows are mostly zeros, so linear learners iterate these instead of
/// the dense rows.
pub(crate) fn sparse_rows(x: &[Vec<f64>]) -> Vec<Vec<(usize, f64)>> {
    x.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|&(_, &v)| v != 0.0)
                .map(|(j, &v)| (j, v))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learner_name_matching() {
        let params = ModelParams::new();
        for name in ["Random Forest", "random_forest", "RANDOM-FOREST", "randomforest"] {
            let learner = Learner::from_name(name, &params).unwrap();
            assert_eq!(learner.display_name(), "Random Forest");
        }
        assert_eq!(
            Learner::from_name("Naive Bayes", &params).unwrap().display_name(),
            "Naive Bayes"
        );
    }

    #[test]
    fn test_unknown_model() {
        let err = Learner::from_name("SVM", &ModelParams::new()).unwrap_err();
        assert!(matches!(err, UlasanError::UnknownModel(_)));
    }

    #[test]
    fn test_mistyped_params_fail_at_resolution() {
        let params = ModelParams::new().with("n_estimators", "lots");
        assert!(matches!(
            Learner::from_name("Random Forest", &params),
            Err(UlasanError::Configuration(_))
        ));
    }

    #[test]
    fn test_check_training_set() {
        let x = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert_eq!(check_training_set(&x, &[0, 1]).unwrap(), 2);
        assert!(matches!(
            check_training_set(&[], &[]),
            Err(UlasanError::InsufficientData(_))
        ));
        assert!(matches!(
            check_training_set(&x, &[0]),
            Err(UlasanError::InvalidInput(_))
        ));
        assert!(matches!(
            check_training_set(&x, &[0, 2]),
            Err(UlasanError::InvalidInput(_))
        ));
        let ragged = vec![vec![0.0, 1.0], vec![1.0]];
        assert!(matches!(
            check_training_set(&ragged, &[0, 1]),
            Err(UlasanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sparse_rows() {
        let rows = sparse_rows(&[vec![0.0, 0.5, 0.0, 2.0]]);
        assert_eq!(rows, vec![vec![(1, 0.5), (3, 2.0)]]);
    }
}
