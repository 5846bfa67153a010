//! Multinomial naive Bayes over non-negative feature weights.

use crate::error::{Result, UlasanError};
use crate::ml::classifier::params::{ModelParams, positive};
use crate::ml::classifier::{BinaryClassifier, check_training_set, sparse_rows};

#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBayesConfig {
    /// Additive (Laplace) smoothing
    pub alpha: f64,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl NaiveBayesConfig {
    pub fn from_params(params: &ModelParams) -> Result<Self> {
        Ok(Self {
            alpha: positive("alpha", params.f64_or("alpha", Self::default().alpha)?)?,
        })
    }
}

/// Two-class multinomial naive Bayes.
///
/// Index 0 of each array is class `0`, index 1 is class `1`. A class absent
/// from the training targets has a log prior of negative infinity.
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    config: NaiveBayesConfig,
    /// log P(class)
    class_log_prior: [f64; 2],
    /// log P(feature | class)
    feature_log_prob: [Vec<f64>; 2],
    fitted: bool,
}

impl NaiveBayes {
    pub fn new(config: NaiveBayesConfig) -> Self {
        Self {
            config,
            class_log_prior: [f64::NEG_INFINITY; 2],
            feature_log_prob: [Vec::new(), Vec::new()],
            fitted: false,
        }
    }

    pub fn class_log_prior(&self) -> [f64; 2] {
        self.class_log_prior
    }

    fn joint_log_likelihood(&self, class: usize, row: &[f64]) -> f64 {
        let prior = self.class_log_prior[class];
        if prior == f64::NEG_INFINITY {
            return prior;
        }
        prior
            + self.feature_log_prob[class]
                .iter()
                .zip(row)
                .filter(|&(_, &v)| v != 0.0)
                .map(|(lp, v)| lp * v)
                .sum::<f64>()
    }
}

impl BinaryClassifier for NaiveBayes {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()> {
        let n_features = check_training_set(x, y)?;
        let rows = sparse_rows(x);

        let mut class_count = [0usize; 2];
        let mut feature_count = [vec![0.0; n_features], vec![0.0; n_features]];

        for (row, &target) in rows.iter().zip(y) {
            let class = usize::from(target);
            class_count[class] += 1;
            for &(j, v) in row {
                if v < 0.0 {
                    return Err(UlasanError::invalid_input(format!(
                        "naive Bayes needs non-negative features, got {v} in column {j}"
                    )));
                }
                feature_count[class][j] += v;
            }
        }

        let n = rows.len() as f64;
        let alpha = self.config.alpha;
        let mut class_log_prior = [f64::NEG_INFINITY; 2];
        let mut feature_log_prob = [Vec::new(), Vec::new()];

        for class in 0..2 {
            if class_count[class] > 0 {
                class_log_prior[class] = (class_count[class] as f64 / n).ln();
            }
            // P(feature|class) = (count + alpha) / (total + alpha * n_features)
            let total: f64 = feature_count[class].iter().sum();
            let denominator = total + alpha * n_features as f64;
            feature_log_prob[class] = feature_count[class]
                .iter()
                .map(|&count| ((count + alpha) / denominator).ln())
                .collect();
        }

        self.class_log_prior = class_log_prior;
        self.feature_log_prob = feature_log_prob;
        self.fitted = true;
        Ok(())
    }

    fn predict_proba(&self, row: &[f64]) -> f64 {
        if !self.fitted {
            return 0.0;
        }
        let negative = self.joint_log_likelihood(0, row);
        let positive = self.joint_log_likelihood(1, row);
        if positive == f64::NEG_INFINITY {
            return 0.0;
        }
        if negative == f64::NEG_INFINITY {
            return 1.0;
        }
        // Two-class softmax.
        1.0 / (1.0 + (negative - positive).exp())
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn name(&self) -> &'static str {
        "naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_bayes_classification() {
        let x = vec![
            vec![0.8, 0.0, 0.2],
            vec![0.9, 0.1, 0.0],
            vec![0.0, 0.7, 0.3],
            vec![0.1, 0.9, 0.0],
        ];
        let y = vec![1, 1, 0, 0];
        let mut model = NaiveBayes::new(NaiveBayesConfig::default());
        model.fit(&x, &y).unwrap();

        assert_eq!(model.predict(&[1.0, 0.0, 0.0]), 1);
        assert_eq!(model.predict(&[0.0, 1.0, 0.0]), 0);

        let prior = model.class_log_prior();
        assert!((prior[0] - 0.5f64.ln()).abs() < 1e-12);
        assert!((prior[1] - 0.5f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_row_follows_prior() {
        let x = vec![vec![1.0], vec![1.0], vec![1.0]];
        let mut model = NaiveBayes::new(NaiveBayesConfig::default());
        model.fit(&x, &[1, 1, 0]).unwrap();
        assert!((model.predict_proba(&[0.0]) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_class() {
        let x = vec![vec![0.3, 0.7]];
        let mut model = NaiveBayes::new(NaiveBayesConfig::default());
        model.fit(&x, &[1]).unwrap();
        assert_eq!(model.predict_proba(&[0.0, 0.0]), 1.0);

        model.fit(&x, &[0]).unwrap();
        assert_eq!(model.predict_proba(&[0.3, 0.7]), 0.0);
    }

    #[test]
    fn test_rejects_negative_features() {
        let mut model = NaiveBayes::new(NaiveBayesConfig::default());
        assert!(matches!(
            model.fit(&[vec![-0.5]], &[1]),
            Err(UlasanError::InvalidInput(_))
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_alpha_must_be_positive() {
        let params = ModelParams::new().with("alpha", 0);
        assert!(NaiveBayesConfig::from_params(&params).is_err());
        let params = ModelParams::new().with("alpha", 0.1);
        assert_eq!(NaiveBayesConfig::from_params(&params).unwrap().alpha, 0.1);
    }
}
