//! # Ulasan
//!
//! Aspect-based sentiment classification for Indonesian car reviews.
//!
//! ## Features
//!
//! - Indonesian text normalization (slang, stop words, noise removal)
//! - TF-IDF feature extraction
//! - Multi-label classification over 6 aspects × 3 polarities
//! - Per-session model bundles with an on-demand fallback model

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod label;
pub mod ml;
pub mod pipeline;

pub mod prelude {
    pub use crate::analysis::TextNormalizer;
    pub use crate::config::TrainingConfig;
    pub use crate::dataset::LabeledExample;
    pub use crate::error::{Result, UlasanError};
    pub use crate::label::{Aspect, Label, LabelSpace, Polarity, Prediction};
    pub use crate::ml::{ModelParams, MultiLabelClassifier, TfIdfVectorizer};
    pub use crate::pipeline::{
        AspectSummary, BundleStore, InMemoryBundleStore, ModelBundle, PredictionReport,
        PredictionService, ResultAggregator, SessionId, TrainingPipeline,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
