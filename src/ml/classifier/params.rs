//! Opaque hyperparameter map handed to learners.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, UlasanError};

/// Learner hyperparameters keyed by name.
///
/// Values stay untyped until a learner reads them; every getter returns the
/// default when the key is absent or `null`, and a `Configuration` error
/// when the value has the wrong type or range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelParams(Map<String, Value>);

impl ModelParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter.
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a non-negative integer.
    pub fn usize_or(&self, key: &str, default: usize) -> Result<usize> {
        Ok(self.opt_usize(key)?.unwrap_or(default))
    }

    /// Read a non-negative integer that may be absent.
    pub fn opt_usize(&self, key: &str) -> Result<Option<usize>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|v| usize::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| mistyped(key, "a non-negative integer", value)),
        }
    }

    pub fn u64_or(&self, key: &str, default: u64) -> Result<u64> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_u64()
                .ok_or_else(|| mistyped(key, "a non-negative integer", value)),
        }
    }

    /// Read a finite number; integers are accepted.
    pub fn f64_or(&self, key: &str, default: f64) -> Result<f64> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| mistyped(key, "a finite number", value)),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| mistyped(key, "a boolean", value)),
        }
    }
}

impl From<Map<String, Value>> for ModelParams {
    fn from(map: Map<String, Value>) -> Self {
        ModelParams(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ModelParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ModelParams(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn mistyped(key: &str, expected: &str, value: &Value) -> UlasanError {
    UlasanError::configuration(format!(
        "parameter '{key}' must be {expected}, got {value}"
    ))
}

/// Fail unless `value >= min`.
pub(crate) fn at_least(key: &str, value: usize, min: usize) -> Result<usize> {
    if value < min {
        return Err(UlasanError::configuration(format!(
            "parameter '{key}' must be at least {min}, got {value}"
        )));
    }
    Ok(value)
}

/// Fail unless `value > 0`.
pub(crate) fn positive(key: &str, value: f64) -> Result<f64> {
    if value <= 0.0 {
        return Err(UlasanError::configuration(format!(
            "parameter '{key}' must be positive, got {value}"
        )));
    }
    Ok(value)
}
