//! Core types for textmod

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single input unit submitted for classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sample(String);

impl Sample {
    /// Create a new sample from text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text to classify
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Sample {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Sample {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `(label, score)` pair of a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    /// Class label
    pub label: String,

    /// Confidence score (0.0-1.0)
    pub score: f32,
}

impl LabelScore {
    /// Create a new label score
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Check that a classification result is well formed.
///
/// A result must carry at least one label, every label must be non-empty,
/// and every score must be a finite value within `[0, 1]`.
pub fn validate_labels(labels: &[LabelScore]) -> Result<()> {
    if labels.is_empty() {
        return Err(Error::malformed("classification returned no labels"));
    }

    for entry in labels {
        if entry.label.trim().is_empty() {
            return Err(Error::malformed("classification returned an empty label"));
        }
        if !entry.score.is_finite() || !(0.0..=1.0).contains(&entry.score) {
            return Err(Error::malformed(format!(
                "score {} for label '{}' is outside [0, 1]",
                entry.score, entry.label
            )));
        }
    }

    Ok(())
}
