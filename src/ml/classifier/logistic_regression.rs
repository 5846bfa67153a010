//! L2-regularized logistic regression fitted by batch gradient descent.

use crate::error::Result;
use crate::ml::classifier::params::{ModelParams, at_least, positive};
use crate::ml::classifier::{BinaryClassifier, check_training_set, sparse_rows};

/// Logistic regression hyperparameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticConfig {
    /// Inverse regularization strength
    pub c: f64,
    pub learning_rate: f64,
    pub max_iter: usize,
    /// Stop once every gradient component is below this
    pub tol: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            learning_rate: 0.5,
            max_iter: 500,
            tol: 1e-6,
        }
    }
}

impl LogisticConfig {
    pub fn from_params(params: &ModelParams) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            c: positive("c", params.f64_or("c", defaults.c)?)?,
            learning_rate: positive(
                "learning_rate",
                params.f64_or("learning_rate", defaults.learning_rate)?,
            )?,
            max_iter: at_least("max_iter", params.usize_or("max_iter", defaults.max_iter)?, 1)?,
            tol: positive("tol", params.f64_or("tol", defaults.tol)?)?,
        })
    }
}

/// Logistic Regression classifier
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    config: LogisticConfig,
    /// Fitted coefficients
    weights: Vec<f64>,
    /// Intercept term
    bias: f64,
    n_iter: usize,
    fitted: bool,
}

impl LogisticRegression {
    pub fn new(config: LogisticConfig) -> Self {
        Self {
            config,
            weights: Vec::new(),
            bias: 0.0,
            n_iter: 0,
            fitted: false,
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Iterations run by the last `fit`.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    fn decision(&self, row: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(row)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.bias
    }
}

/// Sigmoid activation function
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let exp_z = z.exp();
        exp_z / (1.0 + exp_z)
    }
}

impl BinaryClassifier for LogisticRegression {
    /// Minimizes mean log loss plus `||w||² / (2·c·n)`; the intercept is not
    /// regularized.
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()> {
        let n_features = check_training_set(x, y)?;
        let rows = sparse_rows(x);
        let n = rows.len() as f64;
        let lambda = 1.0 / (self.config.c * n);
        let lr = self.config.learning_rate;

        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;
        let mut grad = vec![0.0; n_features];
        let mut n_iter = 0;

        for _ in 0..self.config.max_iter {
            n_iter += 1;
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_bias = 0.0;

            for (row, &target) in rows.iter().zip(y) {
                let z = row.iter().map(|&(j, v)| weights[j] * v).sum::<f64>() + bias;
                let error = sigmoid(z) - f64::from(target);
                for &(j, v) in row {
                    grad[j] += error * v;
                }
                grad_bias += error;
            }

            let mut max_step = (grad_bias / n).abs();
            bias -= lr * grad_bias / n;
            for (w, g) in weights.iter_mut().zip(&grad) {
                let step = g / n + lambda * *w;
                max_step = max_step.max(step.abs());
                *w -= lr * step;
            }

            if max_step < self.config.tol {
                break;
            }
        }

        self.weights = weights;
        self.bias = bias;
        self.n_iter = n_iter;
        self.fitted = true;
        Ok(())
    }

    fn predict_proba(&self, row: &[f64]) -> f64 {
        if !self.fitted {
            return 0.0;
        }
        sigmoid(self.decision(row))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}
