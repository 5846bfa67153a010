//! The fitted artifacts needed to predict.

use crate::error::{Result, UlasanError};
use crate::label::{LabelSpace, LabelVector};
use crate::ml::{MultiLabelClassifier, TfIdfVectorizer};

/// A fitted vectorizer and classifier with the label space they share.
///
/// Immutable once built; retraining produces a new bundle.
#[derive(Debug)]
pub struct ModelBundle {
    vectorizer: TfIdfVectorizer,
    classifier: MultiLabelClassifier,
    label_space: LabelSpace,
    model_name: String,
}

impl ModelBundle {
    /// Assemble a bundle from fitted parts.
    ///
    /// Fails with `NotFitted` if either part is unfitted and with
    /// `InvalidInput` if their shapes disagree with each other or with the
    /// label space.
    pub fn new(
        vectorizer: TfIdfVectorizer,
        classifier: MultiLabelClassifier,
        label_space: LabelSpace,
    ) -> Result<Self> {
        if !vectorizer.is_fitted() {
            return Err(UlasanError::not_fitted("bundle vectorizer is not fitted"));
        }
        if !classifier.is_fitted() {
            return Err(UlasanError::not_fitted("bundle classifier is not fitted"));
        }
        if classifier.n_features() != vectorizer.vocabulary_size() {
            return Err(UlasanError::invalid_input(format!(
                "classifier expects {} features, vectorizer produces {}",
                classifier.n_features(),
                vectorizer.vocabulary_size()
            )));
        }
        if classifier.n_labels() != label_space.len() {
            return Err(UlasanError::invalid_input(format!(
                "classifier predicts {} labels, label space has {}",
                classifier.n_labels(),
                label_space.len()
            )));
        }

        let model_name = classifier.model_name().to_string();
        Ok(ModelBundle {
            vectorizer,
            classifier,
            label_space,
            model_name,
        })
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &MultiLabelClassifier {
        &self.classifier
    }

    pub fn label_space(&self) -> &LabelSpace {
        &self.label_space
    }

    /// Display name of the learner, e.g. "Random Forest".
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Vectorize normalized texts and predict their label vectors.
    pub fn predict_normalized<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<LabelVector>> {
        let features = self.vectorizer.transform(texts)?;
        self.classifier.predict(&features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::ModelParams;

    fn fitted_parts(n_labels: usize) -> (TfIdfVectorizer, MultiLabelClassifier) {
        let corpus = ["irit sekali", "boros banget"];
        let mut vectorizer = TfIdfVectorizer::standard().unwrap();
        let x = vectorizer.fit_transform(&corpus, 100).unwrap();

        let mut y = vec![vec![0; n_labels], vec![0; n_labels]];
        y[0][2] = 1;
        y[1][0] = 1;
        let mut classifier =
            MultiLabelClassifier::new("Decision Tree", &ModelParams::new()).unwrap();
        classifier.fit(&x, &y).unwrap();
        (vectorizer, classifier)
    }

    #[test]
    fn test_bundle_predicts() {
        let (vectorizer, classifier) = fitted_parts(18);
        let bundle = ModelBundle::new(vectorizer, classifier, LabelSpace::standard()).unwrap();
        assert_eq!(bundle.model_name(), "Decision Tree");

        let predicted = bundle.predict_normalized(&["boros banget"]).unwrap();
        assert_eq!(predicted[0].len(), 18);
        assert_eq!(predicted[0][0], 1);
    }

    #[test]
    fn test_label_count_mismatch() {
        let (vectorizer, classifier) = fitted_parts(3);
        assert!(matches!(
            ModelBundle::new(vectorizer, classifier, LabelSpace::standard()),
            Err(UlasanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unfitted_parts() {
        let (_, classifier) = fitted_parts(18);
        let vectorizer = TfIdfVectorizer::standard().unwrap();
        assert!(matches!(
            ModelBundle::new(vectorizer, classifier, LabelSpace::standard()),
            Err(UlasanError::NotFitted(_))
        ));
    }
}
