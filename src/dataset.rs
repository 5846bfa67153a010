//! Labeled examples and the seeded train/held-out split.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::analysis::TextNormalizer;
use crate::error::{Result, UlasanError};
use crate::label::{LabelSpace, LabelVector};

/// One review with its cleaned text and multi-hot label vector.
///
/// Polarities of one aspect are independent: an example may be both
/// `fuel_negative` and `fuel_positive`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Review text as written.
    pub raw_text: String,
    /// Cleaned text the vectorizer is fitted on.
    pub normalized_text: String,
    /// One `0`/`1` entry per label of the label space.
    pub label_vector: LabelVector,
}

impl LabeledExample {
    /// Create an example, validating the label vector against `space`.
    pub fn new<R, N>(
        raw_text: R,
        normalized_text: N,
        label_vector: LabelVector,
        space: &LabelSpace,
    ) -> Result<Self>
    where
        R: Into<String>,
        N: Into<String>,
    {
        space.validate(&label_vector)?;
        Ok(LabeledExample {
            raw_text: raw_text.into(),
            normalized_text: normalized_text.into(),
            label_vector,
        })
    }

    /// Create an example from a `label column → value` map.
    pub fn from_columns<R, N>(
        raw_text: R,
        normalized_text: N,
        columns: &HashMap<String, u8>,
        space: &LabelSpace,
    ) -> Result<Self>
    where
        R: Into<String>,
        N: Into<String>,
    {
        let label_vector = space.encode_columns(columns)?;
        Self::new(raw_text, normalized_text, label_vector, space)
    }

    /// Create an example from the names of its active labels.
    pub fn from_labels<R, N, I, S>(
        raw_text: R,
        normalized_text: N,
        active: I,
        space: &LabelSpace,
    ) -> Result<Self>
    where
        R: Into<String>,
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let label_vector = space.encode(active)?;
        Self::new(raw_text, normalized_text, label_vector, space)
    }

    /// Create an example whose normalized text is derived from the raw text.
    pub fn normalized<R: Into<String>>(
        raw_text: R,
        label_vector: LabelVector,
        normalizer: &TextNormalizer,
        space: &LabelSpace,
    ) -> Result<Self> {
        let raw_text = raw_text.into();
        let normalized_text = normalizer.normalize(&raw_text);
        Self::new(raw_text, normalized_text, label_vector, space)
    }

    /// Number of active labels.
    pub fn active_count(&self) -> usize {
        self.label_vector.iter().filter(|&&v| v == 1).count()
    }
}

/// Index partition of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub held_out: Vec<usize>,
}

/// Shuffle `0..n` with a seeded RNG and hold out `ceil(ratio * n)` indices.
///
/// Fails with `Configuration` unless `0 < ratio < 1`, and with
/// `InsufficientData` when either partition would be empty.
pub fn train_test_split(n: usize, held_out_ratio: f64, seed: u64) -> Result<Split> {
    if !(held_out_ratio > 0.0 && held_out_ratio < 1.0) {
        return Err(UlasanError::configuration(format!(
            "split ratio must be in (0, 1), got {held_out_ratio}"
        )));
    }
    if n == 0 {
        return Err(UlasanError::insufficient_data("dataset is empty"));
    }

    let n_held_out = (held_out_ratio * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_held_out);
    if n_held_out == 0 || n_train == 0 {
        return Err(UlasanError::insufficient_data(format!(
            "{n} examples cannot be split with ratio {held_out_ratio}: \
             {n_train} train, {n_held_out} held out"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_held_out);
    Ok(Split {
        train,
        held_out: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_example_validation() {
        let space = LabelSpace::standard();
        let mut vector = vec![0; 18];
        vector[0] = 1;

        let example = LabeledExample::new("Boros!", "boros", vector, &space).unwrap();
        assert_eq!(example.active_count(), 1);

        assert!(LabeledExample::new("x", "x", vec![1, 0], &space).is_err());
        assert!(LabeledExample::new("x", "x", vec![3; 18], &space).is_err());
    }

    #[test]
    fn test_from_labels_and_columns_agree() {
        let space = LabelSpace::standard();
        let by_name =
            LabeledExample::from_labels("r", "r", ["part_neutral", "price_negative"], &space)
                .unwrap();

        let mut columns = HashMap::new();
        columns.insert("part_neutral".to_string(), 1);
        columns.insert("price_negative".to_string(), 1);
        columns.insert("service_positive".to_string(), 0);
        let by_column = LabeledExample::from_columns("r", "r", &columns, &space).unwrap();

        assert_eq!(by_name, by_column);
    }

    #[test]
    fn test_normalized_constructor() {
        let space = LabelSpace::standard();
        let normalizer = TextNormalizer::indonesian().unwrap();
        let example =
            LabeledExample::normalized("Harga MAHAL bgt", vec![0; 18], &normalizer, &space)
                .unwrap();

        assert_eq!(example.raw_text, "Harga MAHAL bgt");
        assert_eq!(example.normalized_text, "harga mahal banget");
    }

    #[test]
    fn test_split_sizes_and_coverage() {
        let split = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(split.held_out.len(), 2);
        assert_eq!(split.train.len(), 8);

        let mut all: Vec<usize> = split.train.iter().chain(&split.held_out).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_reproducible() {
        let a = train_test_split(50, 0.2, 42).unwrap();
        let b = train_test_split(50, 0.2, 42).unwrap();
        assert_eq!(a, b);

        let c = train_test_split(50, 0.2, 7).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_split_rounds_held_out_up() {
        let split = train_test_split(3, 0.2, 42).unwrap();
        assert_eq!(split.held_out.len(), 1);
        assert_eq!(split.train.len(), 2);
    }

    #[test]
    fn test_split_errors() {
        assert!(matches!(
            train_test_split(0, 0.2, 42),
            Err(UlasanError::InsufficientData(_))
        ));
        assert!(matches!(
            train_test_split(1, 0.2, 42),
            Err(UlasanError::InsufficientData(_))
        ));
        assert!(matches!(
            train_test_split(10, 0.0, 42),
            Err(UlasanError::Configuration(_))
        ));
        assert!(matches!(
            train_test_split(10, 1.0, 42),
            Err(UlasanError::Configuration(_))
        ));
        assert!(matches!(
            train_test_split(10, f64::NAN, 42),
            Err(UlasanError::Configuration(_))
        ));
    }
}
