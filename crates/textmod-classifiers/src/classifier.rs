//! Classifier trait

use async_trait::async_trait;
use textmod_core::{LabelScore, Result};

/// Trait for all classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text.
    ///
    /// Returns every label the classifier knows about, ordered by score
    /// descending.
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>>;

    /// Get the classifier name
    fn name(&self) -> &str;
}
