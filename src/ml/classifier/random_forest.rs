//! Random Forest implementation

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::Result;
use crate::ml::classifier::decision_tree::{DecisionTree, TreeConfig};
use crate::ml::classifier::params::{ModelParams, at_least};
use crate::ml::classifier::{BinaryClassifier, check_training_set};

/// Random Forest configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_estimators: usize,
    /// Maximum depth of each tree
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Max features per split (floor of sqrt of total if None)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestConfig {
    /// Read `n_estimators` and `bootstrap` on top of the tree parameters.
    pub fn from_params(params: &ModelParams) -> Result<Self> {
        let tree = TreeConfig::from_params(params)?;
        let defaults = Self::default();
        Ok(Self {
            n_estimators: at_least(
                "n_estimators",
                params.usize_or("n_estimators", defaults.n_estimators)?,
                1,
            )?,
            max_depth: tree.max_depth,
            min_samples_split: tree.min_samples_split,
            min_samples_leaf: tree.min_samples_leaf,
            max_features: tree.max_features,
            bootstrap: params.bool_or("bootstrap", defaults.bootstrap)?,
            seed: tree.seed,
        })
    }
}

/// Random Forest model
#[derive(Debug, Clone)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Create a new random forest
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }
}

impl BinaryClassifier for RandomForest {
    /// Train the random forest
    ///
    /// Tree `i` draws its bootstrap sample and split features from a RNG
    /// seeded with `seed + i`, so the result does not depend on how rayon
    /// schedules the trees.
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()> {
        let n_features = check_training_set(x, y)?;
        let n_samples = x.len();

        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| default_max_features(n_features));

        // Build trees in parallel
        let trees = (0..self.config.n_estimators)
            .into_par_iter()
            .map(|i| -> Result<DecisionTree> {
                let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(i as u64));

                // Bootstrap sample or use full dataset
                let sample: Vec<usize> = if self.config.bootstrap {
                    (0..n_samples)
                        .map(|_| rng.random_range(0..n_samples))
                        .collect()
                } else {
                    (0..n_samples).collect()
                };

                let mut tree = DecisionTree::new(TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: rng.random(),
                });
                tree.fit_sample(x, y, &sample)?;
                Ok(tree)
            })
            .collect::<Result<Vec<_>>>()?;

        trace!(
            "fitted random forest: {} trees, {} samples, {} of {} features per split",
            trees.len(),
            n_samples,
            max_features.min(n_features),
            n_features
        );

        self.trees = trees;
        Ok(())
    }

    /// Mean of the trees' leaf probabilities.
    fn predict_proba(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        self.trees.iter().map(|t| t.predict_proba(row)).sum::<f64>() / self.trees.len() as f64
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}

/// Features examined per split when `max_features` is unset: `floor(sqrt(d))`,
/// at least one.
fn default_max_features(n_features: usize) -> usize {
    ((n_features as f64).sqrt().floor() as usize).max(1)
}
