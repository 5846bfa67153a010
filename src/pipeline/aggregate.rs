//! Grouping of predicted labels by aspect.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::label::{Aspect, Polarity, Prediction};

/// Per-aspect polarities of a prediction.
///
/// Always holds all six aspects in [`Aspect::ALL`] order; an aspect without
/// predicted labels has an empty polarity list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AspectSummary {
    groups: Vec<(Aspect, Vec<Polarity>)>,
}

impl AspectSummary {
    pub fn get(&self, aspect: Aspect) -> &[Polarity] {
        self.groups
            .iter()
            .find(|(a, _)| *a == aspect)
            .map(|(_, polarities)| polarities.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Aspect, &[Polarity])> {
        self.groups
            .iter()
            .map(|(aspect, polarities)| (*aspect, polarities.as_slice()))
    }

    /// True when no aspect has a predicted polarity.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, polarities)| polarities.is_empty())
    }

    /// Aspects with at least one predicted polarity.
    pub fn active_aspects(&self) -> Vec<Aspect> {
        self.iter()
            .filter(|(_, polarities)| !polarities.is_empty())
            .map(|(aspect, _)| aspect)
            .collect()
    }
}

impl Serialize for AspectSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (aspect, polarities) in &self.groups {
            let names: Vec<&str> = polarities.iter().map(Polarity::as_str).collect();
            map.serialize_entry(aspect.as_str(), &names)?;
        }
        map.end()
    }
}

impl From<&Prediction> for AspectSummary {
    fn from(prediction: &Prediction) -> Self {
        ResultAggregator::group_by_aspect(prediction)
    }
}

/// Turns a flat [`Prediction`] into an [`AspectSummary`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAggregator;

impl ResultAggregator {
    /// Group active labels by aspect, keeping label space order within each
    /// aspect.
    pub fn group_by_aspect(prediction: &Prediction) -> AspectSummary {
        let groups = Aspect::ALL
            .into_iter()
            .map(|aspect| {
                let polarities = prediction
                    .labels()
                    .iter()
                    .filter(|label| label.aspect == aspect)
                    .map(|label| label.polarity)
                    .collect();
                (aspect, polarities)
            })
            .collect();
        AspectSummary { groups }
    }
}
