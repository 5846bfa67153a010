//! Feature extraction and classification.
//!
//! [`TfIdfVectorizer`] turns normalized review text into fixed-width
//! feature rows; [`MultiLabelClassifier`] maps those rows to label vectors
//! with one binary learner per label.

pub mod classifier;
pub mod tfidf;

pub use classifier::{BinaryClassifier, Learner, ModelParams, MultiLabelClassifier};
pub use tfidf::TfIdfVectorizer;
