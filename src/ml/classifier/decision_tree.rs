//! Binary CART decision tree with gini impurity.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, UlasanError};
use crate::ml::classifier::params::{ModelParams, at_least};
use crate::ml::classifier::{BinaryClassifier, check_training_set, sparse_rows};

/// Decision tree configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    /// Maximum depth of tree (None = grow until leaves are pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf node
    pub min_samples_leaf: usize,
    /// Maximum features to consider for split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

impl TreeConfig {
    /// Read `max_depth`, `min_samples_split`, `min_samples_leaf`,
    /// `max_features` and `random_state`.
    pub fn from_params(params: &ModelParams) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            max_depth: params
                .opt_usize("max_depth")?
                .map(|d| at_least("max_depth", d, 1))
                .transpose()?,
            min_samples_split: at_least(
                "min_samples_split",
                params.usize_or("min_samples_split", defaults.min_samples_split)?,
                2,
            )?,
            min_samples_leaf: at_least(
                "min_samples_leaf",
                params.usize_or("min_samples_leaf", defaults.min_samples_leaf)?,
                1,
            )?,
            max_features: params
                .opt_usize("max_features")?
                .map(|m| at_least("max_features", m, 1))
                .transpose()?,
            seed: params.u64_or("random_state", defaults.seed)?,
        })
    }
}

/// Tree node
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        /// Fraction of class `1` samples that reached this leaf
        probability: f64,
        n_samples: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

/// Decision Tree model
#[derive(Debug, Clone)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<Node>,
    n_features: usize,
}

impl DecisionTree {
    /// Create a new decision tree with config
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            n_features: 0,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Train on the rows of `x` listed in `sample`.
    ///
    /// Indices may repeat, which is how bootstrap samples are passed in.
    pub fn fit_sample(&mut self, x: &[Vec<f64>], y: &[u8], sample: &[usize]) -> Result<()> {
        let n_features = check_training_set(x, y)?;
        if sample.is_empty() {
            return Err(UlasanError::insufficient_data(
                "cannot fit a decision tree on an empty sample",
            ));
        }
        if let Some(&i) = sample.iter().find(|&&i| i >= x.len()) {
            return Err(UlasanError::invalid_input(format!(
                "sample index {i} out of range for {} rows",
                x.len()
            )));
        }

        let sparse = sparse_rows(x);
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let root = self.build_tree(x, &sparse, y, sample, 0, n_features, &mut rng);

        self.root = Some(root);
        self.n_features = n_features;
        Ok(())
    }

    /// Build tree recursively
    #[allow(clippy::too_many_arguments)]
    fn build_tree(
        &self,
        x: &[Vec<f64>],
        sparse: &[Vec<(usize, f64)>],
        y: &[u8],
        indices: &[usize],
        depth: usize,
        n_features: usize,
        rng: &mut StdRng,
    ) -> Node {
        let n = indices.len();
        let positives = indices.iter().filter(|&&i| y[i] == 1).count();
        let leaf = Node::Leaf {
            probability: positives as f64 / n as f64,
            n_samples: n,
        };

        // Check stopping conditions
        if self.config.max_depth.is_some_and(|max| depth >= max)
            || n < self.config.min_samples_split
            || positives == 0
            || positives == n
        {
            return leaf;
        }

        let Some((feature, threshold)) =
            self.find_best_split(x, sparse, y, indices, n_features, rng)
        else {
            return leaf;
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| x[i][feature] <= threshold);
        if left.is_empty() || right.is_empty() {
            return leaf;
        }

        Node::Split {
            feature,
            threshold,
            left: Box::new(self.build_tree(x, sparse, y, &left, depth + 1, n_features, rng)),
            right: Box::new(self.build_tree(x, sparse, y, &right, depth + 1, n_features, rng)),
        }
    }

    /// Find the best split among up to `max_features` non-constant features.
    ///
    /// Features are visited in a seeded random order; constant features do
    /// not count towards the limit.
    fn find_best_split(
        &self,
        x: &[Vec<f64>],
        sparse: &[Vec<(usize, f64)>],
        y: &[u8],
        indices: &[usize],
        n_features: usize,
        rng: &mut StdRng,
    ) -> Option<(usize, f64)> {
        let max_features = self
            .config
            .max_features
            .unwrap_or(n_features)
            .min(n_features);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        let varies = varying_features(x, sparse, indices, n_features);

        let n = indices.len();
        let total_positives = indices.iter().filter(|&&i| y[i] == 1).count();
        let min_leaf = self.config.min_samples_leaf;

        let mut best_impurity = gini(total_positives, n);
        let mut best_split = None;
        let mut visited = 0;
        let mut column: Vec<(f64, u8)> = Vec::with_capacity(n);

        for feature in feature_indices {
            if visited == max_features {
                break;
            }

            if !varies[feature] {
                continue;
            }
            visited += 1;

            column.clear();
            column.extend(indices.iter().map(|&i| (x[i][feature], y[i])));
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_positives = 0;
            for k in 0..n - 1 {
                left_positives += usize::from(column[k].1);
                let (lo, hi) = (column[k].0, column[k + 1].0);
                if lo == hi {
                    continue;
                }

                let n_left = k + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let weighted = (n_left as f64 * gini(left_positives, n_left)
                    + n_right as f64 * gini(total_positives - left_positives, n_right))
                    / n as f64;

                if weighted < best_impurity - 1e-12 {
                    best_impurity = weighted;
                    let mid = lo + (hi - lo) / 2.0;
                    // Adjacent floats can round the midpoint up to `hi`.
                    let threshold = if mid < hi { mid } else { lo };
                    best_split = Some((feature, threshold));
                }
            }
        }

        best_split
    }

    /// Depth of the fitted tree (a lone leaf has depth 1).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    pub fn n_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, Node::n_leaves)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

impl BinaryClassifier for DecisionTree {
    fn fit(&mut self, x: &[Vec<f64>], y: &[u8]) -> Result<()> {
        let sample: Vec<usize> = (0..x.len()).collect();
        self.fit_sample(x, y, &sample)
    }

    fn predict_proba(&self, row: &[f64]) -> f64 {
        let mut node = match &self.root {
            Some(root) => root,
            None => return 0.0,
        };
        loop {
            match node {
                Node::Leaf { probability, .. } => return *probability,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    fn name(&self) -> &'static str {
        "decision_tree"
    }
}

/// Flags the features whose value is not the same on every row of `indices`.
///
/// Only the non-zero entries of each row are visited: a feature that is zero
/// everywhere is constant, one that is non-zero on some rows only varies.
fn varying_features(
    x: &[Vec<f64>],
    sparse: &[Vec<(usize, f64)>],
    indices: &[usize],
    n_features: usize,
) -> Vec<bool> {
    let mut nonzero = vec![0usize; n_features];
    let mut varies = vec![false; n_features];
    let first = &x[indices[0]];
    for &i in indices {
        for &(j, v) in &sparse[i] {
            nonzero[j] += 1;
            if v != first[j] {
                varies[j] = true;
            }
        }
    }
    for (flag, &count) in varies.iter_mut().zip(&nonzero) {
        if count > 0 && count < indices.len() {
            *flag = true;
        }
    }
    varies
}

/// Gini impurity of a binary node with `positives` of `n` samples in class 1.
fn gini(positives: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = positives as f64 / n as f64;
    2.0 * p * (1.0 - p)
}
