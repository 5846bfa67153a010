//! Prediction for raw review text.

use log::{debug, info};
use serde::Serialize;

use crate::analysis::TextNormalizer;
use crate::config::TrainingConfig;
use crate::dataset::LabeledExample;
use crate::error::{Result, UlasanError};
use crate::label::Prediction;
use crate::pipeline::aggregate::{AspectSummary, ResultAggregator};
use crate::pipeline::bundle::ModelBundle;
use crate::pipeline::store::{BundleStore, SessionId};
use crate::pipeline::training::TrainingPipeline;

/// Name under which a fallback-trained bundle is stored.
pub const FALLBACK_MODEL_NAME: &str = "Random Forest (default)";

/// Everything shown for one predicted review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub input_text: String,
    pub normalized_text: String,
    pub prediction: Prediction,
    pub summary: AspectSummary,
    pub model_name: String,
    /// True when this request trained the session's fallback model.
    pub trained_fallback: bool,
}

/// Normalizes, vectorizes, classifies and decodes review text.
#[derive(Debug, Clone)]
pub struct PredictionService {
    normalizer: TextNormalizer,
    fallback: TrainingConfig,
}

impl PredictionService {
    pub fn new(normalizer: TextNormalizer) -> Self {
        PredictionService {
            normalizer,
            fallback: TrainingConfig::default_fallback(),
        }
    }

    /// Service with the Indonesian normalizer.
    pub fn indonesian() -> Result<Self> {
        Ok(Self::new(TextNormalizer::indonesian()?))
    }

    /// Replace the configuration used to train a missing session model.
    pub fn with_fallback_config(mut self, config: TrainingConfig) -> Self {
        self.fallback = config;
        self
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn fallback_config(&self) -> &TrainingConfig {
        &self.fallback
    }

    /// Predict the labels of one raw text.
    ///
    /// Text with no known terms yields an all-zero feature row and still
    /// produces a (possibly empty) prediction.
    pub fn predict_one(&self, raw_text: &str, bundle: &ModelBundle) -> Result<Prediction> {
        let normalized = self.normalizer.normalize(raw_text);
        self.predict_normalized(&normalized, bundle)
    }

    /// Predict and summarize one raw text.
    pub fn analyze(&self, raw_text: &str, bundle: &ModelBundle) -> Result<PredictionReport> {
        self.report(raw_text, bundle, bundle.model_name(), false)
    }

    /// Predict with the session's bundle, training the fallback model first
    /// when the session has none.
    ///
    /// `dataset_source` is called only when training is needed. Once stored,
    /// the fallback bundle serves the rest of the session.
    pub fn predict_for_session<S, F>(
        &self,
        store: &S,
        session: &SessionId,
        raw_text: &str,
        dataset_source: F,
    ) -> Result<PredictionReport>
    where
        S: BundleStore + ?Sized,
        F: FnOnce() -> Result<Vec<LabeledExample>>,
    {
        let mut source = Some(dataset_source);
        let mut train = || -> Result<ModelBundle> {
            info!("session {session} has no model, training the fallback model");
            let load = source
                .take()
                .ok_or_else(|| UlasanError::model_unavailable("dataset source already used"))?;
            let dataset = load()?;
            TrainingPipeline::new(self.fallback.clone())?.train(&dataset)
        };

        let (stored, trained) = store.get_or_train(session, FALLBACK_MODEL_NAME, &mut train)?;
        if !trained {
            debug!("session {session} reuses model {}", stored.name);
        }
        self.report(raw_text, &stored.bundle, &stored.name, trained)
    }

    /// Predict with the session's bundle, never training.
    ///
    /// A session without a bundle is `ModelUnavailable`.
    pub fn predict_stored<S>(
        &self,
        store: &S,
        session: &SessionId,
        raw_text: &str,
    ) -> Result<PredictionReport>
    where
        S: BundleStore + ?Sized,
    {
        let stored = store.get_bundle(session).ok_or_else(|| {
            UlasanError::model_unavailable(format!("no trained model for session {session}"))
        })?;
        self.report(raw_text, &stored.bundle, &stored.name, false)
    }

    fn predict_normalized(&self, normalized: &str, bundle: &ModelBundle) -> Result<Prediction> {
        let mut vectors = bundle.predict_normalized(&[normalized])?;
        let vector = vectors
            .pop()
            .ok_or_else(|| UlasanError::invalid_input("classifier returned no rows"))?;
        bundle.label_space().decode(&vector)
    }

    fn report(
        &self,
        raw_text: &str,
        bundle: &ModelBundle,
        model_name: &str,
        trained_fallback: bool,
    ) -> Result<PredictionReport> {
        let normalized_text = self.normalizer.normalize(raw_text);
        let prediction = self.predict_normalized(&normalized_text, bundle)?;
        let summary = ResultAggregator::group_by_aspect(&prediction);
        Ok(PredictionReport {
            input_text: raw_text.to_string(),
            normalized_text,
            prediction,
            summary,
            model_name: model_name.to_string(),
            trained_fallback,
        })
    }
}
