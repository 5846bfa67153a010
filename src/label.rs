//! The aspect–polarity label space.
//!
//! A [`LabelSpace`] fixes the order of the classifiable labels. The same
//! instance encodes training targets and decodes predictions, so index `i`
//! names the same label at both ends of a model.
//!
//! # Examples
//!
//! ```
//! use ulasan::label::LabelSpace;
//!
//! let space = LabelSpace::standard();
//! assert_eq!(space.len(), 18);
//!
//! let vector = space.encode(["fuel_negative", "price_positive"]).unwrap();
//! let prediction = space.decode(&vector).unwrap();
//! assert_eq!(prediction.names(), vec!["fuel_negative", "price_positive"]);
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UlasanError};

/// A multi-hot vector with one `0`/`1` entry per label.
pub type LabelVector = Vec<u8>;

/// A topical category a review can comment on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Fuel,
    Machine,
    Part,
    Other,
    Price,
    Service,
}

impl Aspect {
    /// All aspects in label space order.
    pub const ALL: [Aspect; 6] = [
        Aspect::Fuel,
        Aspect::Machine,
        Aspect::Part,
        Aspect::Other,
        Aspect::Price,
        Aspect::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Fuel => "fuel",
            Aspect::Machine => "machine",
            Aspect::Part => "part",
            Aspect::Other => "other",
            Aspect::Price => "price",
            Aspect::Service => "service",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aspect {
    type Err = UlasanError;

    fn from_str(s: &str) -> Result<Self> {
        Aspect::ALL
            .into_iter()
            .find(|aspect| aspect.as_str() == s)
            .ok_or_else(|| UlasanError::configuration(format!("unknown aspect '{s}'")))
    }
}

/// Sentiment direction for an aspect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Negative,
    Neutral,
    Positive,
}

impl Polarity {
    /// All polarities in label space order.
    pub const ALL: [Polarity; 3] = [Polarity::Negative, Polarity::Neutral, Polarity::Positive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
            Polarity::Positive => "positive",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = UlasanError;

    fn from_str(s: &str) -> Result<Self> {
        Polarity::ALL
            .into_iter()
            .find(|polarity| polarity.as_str() == s)
            .ok_or_else(|| UlasanError::configuration(format!("unknown polarity '{s}'")))
    }
}

/// An aspect–polarity pair, the atomic unit of classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label {
    pub aspect: Aspect,
    pub polarity: Polarity,
}

impl Label {
    pub fn new(aspect: Aspect, polarity: Polarity) -> Self {
        Label { aspect, polarity }
    }

    /// The column name of this label, `<aspect>_<polarity>`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.aspect, self.polarity)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.aspect, self.polarity)
    }
}

impl FromStr for Label {
    type Err = UlasanError;

    fn from_str(s: &str) -> Result<Self> {
        let (aspect, polarity) = s
            .split_once('_')
            .ok_or_else(|| UlasanError::configuration(format!("malformed label '{s}'")))?;
        Ok(Label::new(aspect.parse()?, polarity.parse()?))
    }
}

impl Serialize for Label {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// The ordered list of classifiable labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLabelSpace")]
pub struct LabelSpace {
    labels: Vec<Label>,
}

/// Wire form of [`LabelSpace`], checked by [`LabelSpace::new`] on the way in.
#[derive(Deserialize)]
struct RawLabelSpace {
    labels: Vec<Label>,
}

impl TryFrom<RawLabelSpace> for LabelSpace {
    type Error = UlasanError;

    fn try_from(raw: RawLabelSpace) -> Result<Self> {
        LabelSpace::new(raw.labels)
    }
}

impl LabelSpace {
    /// Create a label space with a custom ordering.
    ///
    /// Fails on an empty list or duplicate labels.
    pub fn new(labels: Vec<Label>) -> Result<Self> {
        if labels.is_empty() {
            return Err(UlasanError::configuration("label space cannot be empty"));
        }
        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(*label) {
                return Err(UlasanError::configuration(format!(
                    "duplicate label '{label}' in label space"
                )));
            }
        }
        Ok(LabelSpace { labels })
    }

    /// The 18 labels, aspect-major: `fuel_negative, fuel_neutral, …,
    /// service_positive`.
    pub fn standard() -> Self {
        let labels = Aspect::ALL
            .into_iter()
            .flat_map(|aspect| {
                Polarity::ALL
                    .into_iter()
                    .map(move |polarity| Label::new(aspect, polarity))
            })
            .collect();
        LabelSpace { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    /// Index of a label given its name.
    pub fn position(&self, name: &str) -> Option<usize> {
        let label: Label = name.parse().ok()?;
        self.labels.iter().position(|l| *l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        self.labels.iter().copied()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Column names in order.
    pub fn names(&self) -> Vec<String> {
        self.labels.iter().map(Label::name).collect()
    }

    /// Encode a set of active label names into a multi-hot vector.
    pub fn encode<I, S>(&self, active: I) -> Result<LabelVector>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vector = vec![0; self.len()];
        for name in active {
            let name = name.as_ref();
            let index = self.position(name).ok_or_else(|| {
                UlasanError::configuration(format!("label '{name}' is not in the label space"))
            })?;
            vector[index] = 1;
        }
        Ok(vector)
    }

    /// Select this space's columns out of a `label name → value` map.
    ///
    /// Missing columns count as 0; present values must be 0 or 1.
    pub fn encode_columns(&self, columns: &HashMap<String, u8>) -> Result<LabelVector> {
        self.labels
            .iter()
            .map(|label| {
                let name = label.name();
                match columns.get(&name).copied().unwrap_or(0) {
                    value @ (0 | 1) => Ok(value),
                    value => Err(UlasanError::invalid_input(format!(
                        "label column '{name}' has non-binary value {value}"
                    ))),
                }
            })
            .collect()
    }

    /// Check that a vector has one binary entry per label.
    pub fn validate(&self, vector: &[u8]) -> Result<()> {
        if vector.len() != self.len() {
            return Err(UlasanError::invalid_input(format!(
                "label vector has length {}, expected {}",
                vector.len(),
                self.len()
            )));
        }
        if let Some(value) = vector.iter().find(|&&v| v > 1) {
            return Err(UlasanError::invalid_input(format!(
                "label vector contains non-binary value {value}"
            )));
        }
        Ok(())
    }

    /// Decode a multi-hot vector produced against this space.
    pub fn decode(&self, vector: &[u8]) -> Result<Prediction> {
        self.validate(vector)?;
        let labels = self
            .labels
            .iter()
            .zip(vector)
            .filter(|(_, value)| **value == 1)
            .map(|(label, _)| *label)
            .collect();
        Ok(Prediction {
            labels,
            vector: vector.to_vec(),
        })
    }
}

impl Default for LabelSpace {
    fn default() -> Self {
        Self::standard()
    }
}

/// The decoded set of active labels, in label space order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    labels: Vec<Label>,
    vector: LabelVector,
}

impl Prediction {
    /// Active labels in label space order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The multi-hot vector this prediction was decoded from.
    pub fn vector(&self) -> &[u8] {
        &self.vector
    }

    pub fn names(&self) -> Vec<String> {
        self.labels.iter().map(Label::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        name.parse::<Label>()
            .map(|label| self.labels.contains(&label))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let space = LabelSpace::standard();
        let names = space.names();

        assert_eq!(names.len(), 18);
        assert_eq!(names[0], "fuel_negative");
        assert_eq!(names[1], "fuel_neutral");
        assert_eq!(names[2], "fuel_positive");
        assert_eq!(names[9], "other_negative");
        assert_eq!(names[17], "service_positive");
    }

    #[test]
    fn test_label_parse_round_trip() {
        let label: Label = "machine_neutral".parse().unwrap();
        assert_eq!(label, Label::new(Aspect::Machine, Polarity::Neutral));
        assert_eq!(label.to_string(), "machine_neutral");

        assert!("machine".parse::<Label>().is_err());
        assert!("engine_positive".parse::<Label>().is_err());
        assert!("fuel_angry".parse::<Label>().is_err());
    }

    #[test]
    fn test_encode_decode_allows_conflicting_polarities() {
        let space = LabelSpace::standard();
        let vector = space
            .encode(["fuel_positive", "fuel_negative", "service_neutral"])
            .unwrap();

        assert_eq!(vector.iter().map(|&v| v as usize).sum::<usize>(), 3);

        let prediction = space.decode(&vector).unwrap();
        assert_eq!(
            prediction.names(),
            vec!["fuel_negative", "fuel_positive", "service_neutral"]
        );
        assert!(prediction.contains("fuel_positive"));
        assert!(!prediction.contains("price_positive"));
        assert!(!prediction.contains("nonsense"));
    }

    #[test]
    fn test_encode_unknown_label() {
        let space = LabelSpace::standard();
        assert!(matches!(
            space.encode(["fuel_great"]),
            Err(UlasanError::Configuration(_))
        ));
    }

    #[test]
    fn test_encode_columns() {
        let space = LabelSpace::standard();
        let mut columns = HashMap::new();
        columns.insert("price_negative".to_string(), 1);
        columns.insert("price_neutral".to_string(), 0);
        columns.insert("unrelated_column".to_string(), 7);

        let vector = space.encode_columns(&columns).unwrap();
        assert_eq!(vector[12], 1);
        assert_eq!(vector.iter().filter(|&&v| v == 1).count(), 1);

        columns.insert("part_positive".to_string(), 2);
        assert!(matches!(
            space.encode_columns(&columns),
            Err(UlasanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decode_rejects_bad_vectors() {
        let space = LabelSpace::standard();
        assert!(space.decode(&[1, 0]).is_err());

        let mut vector = vec![0; 18];
        vector[3] = 2;
        assert!(space.decode(&vector).is_err());
    }

    #[test]
    fn test_custom_space() {
        let space = LabelSpace::new(vec![
            Label::new(Aspect::Price, Polarity::Positive),
            Label::new(Aspect::Fuel, Polarity::Negative),
        ])
        .unwrap();
        assert_eq!(space.position("fuel_negative"), Some(1));
        assert_eq!(space.position("fuel_positive"), None);

        assert!(LabelSpace::new(vec![]).is_err());
        assert!(
            LabelSpace::new(vec![
                Label::new(Aspect::Part, Polarity::Neutral),
                Label::new(Aspect::Part, Polarity::Neutral),
            ])
            .is_err()
        );
    }

    #[test]
    fn test_label_space_deserialize_is_validated() {
        let space = LabelSpace::standard();
        let json = serde_json::to_string(&space).unwrap();
        let back: LabelSpace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, space);

        assert!(serde_json::from_str::<LabelSpace>(r#"{"labels": []}"#).is_err());
        assert!(
            serde_json::from_str::<LabelSpace>(
                r#"{"labels": ["fuel_negative", "price_positive", "fuel_negative"]}"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_label_serde() {
        let label = Label::new(Aspect::Other, Polarity::Negative);
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"other_negative\"");
        let back: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }
}
