//! Training of a [`ModelBundle`] from labeled examples.
//!
//! # Examples
//!
//! ```
//! use ulasan::config::TrainingConfig;
//! use ulasan::dataset::LabeledExample;
//! use ulasan::label::LabelSpace;
//! use ulasan::ml::ModelParams;
//! use ulasan::pipeline::TrainingPipeline;
//!
//! let space = LabelSpace::standard();
//! let dataset: Vec<LabeledExample> = [
//!     ("bahan bakar boros", "fuel_negative"),
//!     ("bahan bakar irit", "fuel_positive"),
//!     ("harga mahal", "price_negative"),
//!     ("harga murah", "price_positive"),
//!     ("servis ramah", "service_positive"),
//! ]
//! .into_iter()
//! .map(|(text, label)| LabeledExample::from_labels(text, text, [label], &space).unwrap())
//! .collect();
//!
//! let config = TrainingConfig::default()
//!     .with_model("Decision Tree")
//!     .with_model_params(ModelParams::new().with("random_state", 1));
//! let bundle = TrainingPipeline::new(config).unwrap().train(&dataset).unwrap();
//! assert_eq!(bundle.classifier().n_labels(), 18);
//! ```

use log::{debug, info};

use crate::config::TrainingConfig;
use crate::dataset::{LabeledExample, Split, train_test_split};
use crate::error::{Result, UlasanError};
use crate::label::{LabelSpace, LabelVector};
use crate::ml::{ModelParams, MultiLabelClassifier, TfIdfVectorizer};
use crate::pipeline::bundle::ModelBundle;

/// A trained bundle together with the partition it was trained on.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub bundle: ModelBundle,
    /// Indices into the dataset; only `split.train` was used for fitting.
    pub split: Split,
}

/// Split, vectorize and fit, producing a fresh [`ModelBundle`].
#[derive(Debug, Clone)]
pub struct TrainingPipeline {
    config: TrainingConfig,
    label_space: LabelSpace,
}

impl TrainingPipeline {
    /// Create a pipeline over the standard label space.
    ///
    /// The configuration is validated here, so an unknown model or a bad
    /// hyperparameter fails before any data is touched.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(TrainingPipeline {
            config,
            label_space: LabelSpace::standard(),
        })
    }

    pub fn with_label_space(mut self, label_space: LabelSpace) -> Self {
        self.label_space = label_space;
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn label_space(&self) -> &LabelSpace {
        &self.label_space
    }

    pub fn train(&self, dataset: &[LabeledExample]) -> Result<ModelBundle> {
        Ok(self.train_detailed(dataset)?.bundle)
    }

    pub fn train_detailed(&self, dataset: &[LabeledExample]) -> Result<TrainingOutcome> {
        info!(
            "training {} on {} examples (split_ratio={}, seed={})",
            self.config.model_name,
            dataset.len(),
            self.config.split_ratio,
            self.config.seed
        );

        let targets = self.encode_targets(dataset)?;
        let split = train_test_split(dataset.len(), self.config.split_ratio, self.config.seed)?;
        debug!(
            "split {} examples into {} train and {} held out",
            dataset.len(),
            split.train.len(),
            split.held_out.len()
        );

        let texts: Vec<&str> = split
            .train
            .iter()
            .map(|&i| dataset[i].normalized_text.as_str())
            .collect();
        let y: Vec<LabelVector> = split.train.iter().map(|&i| targets[i].clone()).collect();

        let mut vectorizer = TfIdfVectorizer::standard()?;
        let x = vectorizer.fit_transform(&texts, self.config.max_features)?;
        debug!("vectorized training texts into {} features", vectorizer.vocabulary_size());

        let mut classifier = MultiLabelClassifier::from_learner(self.config.learner()?);
        classifier.fit(&x, &y)?;

        let bundle = ModelBundle::new(vectorizer, classifier, self.label_space.clone())?;
        info!(
            "trained {} on {} examples with {} labels",
            bundle.model_name(),
            split.train.len(),
            self.label_space.len()
        );

        Ok(TrainingOutcome { bundle, split })
    }

    fn encode_targets(&self, dataset: &[LabeledExample]) -> Result<Vec<LabelVector>> {
        dataset
            .iter()
            .enumerate()
            .map(|(i, example)| {
                self.label_space
                    .validate(&example.label_vector)
                    .map_err(|e| UlasanError::invalid_input(format!("example {i}: {e}")))?;
                Ok(example.label_vector.clone())
            })
            .collect()
    }
}

/// Train with the default vectorizer settings and the given split and model.
pub fn train(
    dataset: &[LabeledExample],
    split_ratio: f64,
    model_name: &str,
    model_params: ModelParams,
) -> Result<ModelBundle> {
    let config = TrainingConfig::default()
        .with_split_ratio(split_ratio)
        .with_model(model_name)
        .with_model_params(model_params);
    TrainingPipeline::new(config)?.train(dataset)
}
