//! One independent binary learner per label column.

use log::debug;

use crate::error::{Result, UlasanError};
use crate::label::LabelVector;
use crate::ml::classifier::{BinaryClassifier, Learner, ModelParams, check_feature_rows};

/// Multi-output classifier predicting a [`LabelVector`] per feature row.
///
/// Learners are stored by label column position; column `i` of every
/// predicted vector comes from learner `i`.
#[derive(Debug)]
pub struct MultiLabelClassifier {
    learner: Learner,
    estimators: Vec<Box<dyn BinaryClassifier>>,
    n_features: usize,
}

impl MultiLabelClassifier {
    /// Resolve `model_name` with `params`, failing on unknown names and
    /// invalid hyperparameters.
    pub fn new(model_name: &str, params: &ModelParams) -> Result<Self> {
        Ok(Self::from_learner(Learner::from_name(model_name, params)?))
    }

    pub fn from_learner(learner: Learner) -> Self {
        MultiLabelClassifier {
            learner,
            estimators: Vec::new(),
            n_features: 0,
        }
    }

    /// Fit one learner per column of `y`.
    ///
    /// A failed fit leaves the previously fitted learners in place.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[LabelVector]) -> Result<()> {
        if x.is_empty() {
            return Err(UlasanError::insufficient_data(
                "cannot fit a classifier on zero rows",
            ));
        }
        if x.len() != y.len() {
            return Err(UlasanError::invalid_input(format!(
                "{} feature rows but {} label rows",
                x.len(),
                y.len()
            )));
        }
        let n_features = check_feature_rows(x)?;

        let n_labels = y[0].len();
        if n_labels == 0 {
            return Err(UlasanError::invalid_input("label rows are empty"));
        }
        for (i, row) in y.iter().enumerate() {
            if row.len() != n_labels {
                return Err(UlasanError::invalid_input(format!(
                    "label row {i} has {} entries, expected {n_labels}",
                    row.len()
                )));
            }
            if row.iter().any(|&v| v > 1) {
                return Err(UlasanError::invalid_input(format!(
                    "label row {i} is not binary"
                )));
            }
        }

        let mut estimators = Vec::with_capacity(n_labels);
        for column in 0..n_labels {
            let target: Vec<u8> = y.iter().map(|row| row[column]).collect();
            let positives = target.iter().filter(|&&v| v == 1).count();

            let mut estimator = self.learner.build();
            estimator.fit(x, &target)?;
            debug!(
                "fitted {} for label column {column} ({positives}/{} positive)",
                estimator.name(),
                target.len()
            );
            estimators.push(estimator);
        }

        self.estimators = estimators;
        self.n_features = n_features;
        Ok(())
    }

    /// Predict one label vector per feature row.
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<LabelVector>> {
        if !self.is_fitted() {
            return Err(UlasanError::not_fitted(
                "MultiLabelClassifier.predict called before fit",
            ));
        }
        x.iter()
            .map(|row| {
                if row.len() != self.n_features {
                    return Err(UlasanError::invalid_input(format!(
                        "feature row has {} columns, classifier was fitted on {}",
                        row.len(),
                        self.n_features
                    )));
                }
                Ok(self.estimators.iter().map(|e| e.predict(row)).collect())
            })
            .collect()
    }

    /// Number of label columns seen by `fit`.
    pub fn n_labels(&self) -> usize {
        self.estimators.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn is_fitted(&self) -> bool {
        !self.estimators.is_empty()
    }

    pub fn model_name(&self) -> &'static str {
        self.learner.display_name()
    }

    pub fn learner(&self) -> &Learner {
        &self.learner
    }
}
