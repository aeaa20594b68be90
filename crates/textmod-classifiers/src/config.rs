//! Configuration for the moderation classifier

use crate::label::ModerationLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Moderation classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Longest text (in characters) accepted for classification
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Additional terms merged into the built-in lexicon of each label
    #[serde(default)]
    pub extra_terms: BTreeMap<ModerationLabel, Vec<String>>,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            extra_terms: BTreeMap::new(),
        }
    }
}

fn default_max_input_chars() -> usize {
    4096
}
