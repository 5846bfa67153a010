//! Training configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UlasanError};
use crate::ml::classifier::{Learner, ModelParams};

/// Settings for one training run.
///
/// Every field has a serde default, so `{}` deserializes to
/// [`TrainingConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Maximum vocabulary size of the TF-IDF vectorizer.
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Fraction of examples held out from training, in (0, 1).
    #[serde(default = "default_split_ratio")]
    pub split_ratio: f64,

    /// Seed of the train/held-out shuffle.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Learner display name, e.g. "Random Forest".
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Learner hyperparameters.
    #[serde(default = "default_model_params")]
    pub model_params: ModelParams,
}

fn default_max_features() -> usize {
    5000
}
fn default_split_ratio() -> f64 {
    0.2
}
fn default_seed() -> u64 {
    42
}
fn default_model_name() -> String {
    "Random Forest".to_string()
}
fn default_model_params() -> ModelParams {
    ModelParams::new().with("n_estimators", 100)
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            split_ratio: default_split_ratio(),
            seed: default_seed(),
            model_name: default_model_name(),
            model_params: default_model_params(),
        }
    }
}

impl TrainingConfig {
    /// Configuration used when a session needs a model and has none.
    pub fn default_fallback() -> Self {
        Self::default()
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_split_ratio(mut self, split_ratio: f64) -> Self {
        self.split_ratio = split_ratio;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the learner; the learner's parameters are reset to empty.
    pub fn with_model<S: Into<String>>(mut self, model_name: S) -> Self {
        self.model_name = model_name.into();
        self.model_params = ModelParams::new();
        self
    }

    pub fn with_model_params(mut self, model_params: ModelParams) -> Self {
        self.model_params = model_params;
        self
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TrainingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting, including the learner name and parameters.
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(UlasanError::configuration(
                "max_features must be a positive integer",
            ));
        }
        if !(self.split_ratio > 0.0 && self.split_ratio < 1.0) {
            return Err(UlasanError::configuration(format!(
                "split_ratio must be in (0, 1), got {}",
                self.split_ratio
            )));
        }
        self.learner().map(|_| ())
    }

    /// Resolve the configured learner.
    pub fn learner(&self) -> Result<Learner> {
        Learner::from_name(&self.model_name, &self.model_params)
    }
}
