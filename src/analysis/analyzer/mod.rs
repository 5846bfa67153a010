//! Analyzer implementations that combine char filters, tokenizers and filters.

mod analyzer;
mod indonesian;
mod pipeline;

pub use analyzer::Analyzer;
pub use indonesian::IndonesianAnalyzer;
pub use pipeline::PipelineAnalyzer;
