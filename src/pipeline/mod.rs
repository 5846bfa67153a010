//! Training and prediction workflows around a [`ModelBundle`].
//!
//! [`TrainingPipeline`] produces bundles, [`BundleStore`] keeps one per
//! session and [`PredictionService`] turns raw text into a
//! [`PredictionReport`].

pub mod aggregate;
pub mod bundle;
pub mod prediction;
pub mod store;
pub mod training;

pub use aggregate::{AspectSummary, ResultAggregator};
pub use bundle::ModelBundle;
pub use prediction::{FALLBACK_MODEL_NAME, PredictionReport, PredictionService};
pub use store::{BundleStore, InMemoryBundleStore, SessionId, StoredBundle};
pub use training::{TrainingOutcome, TrainingPipeline, train};
