//! textmod Classifiers
//!
//! Classifiers answering the `classify(text) -> [(label, score)]` contract.
//!
//! The built-in [`ModerationClassifier`] is a lexicon classifier over the
//! moderation label set (`OK`, `S`, `H`, `V`, `HR`, `SH`, `S3`, `H2`, `V2`).
//! It is deterministic and runs on CPU with minimal overhead, which makes it a
//! stable in-process collaborator for latency benchmarks.
//!
//! Classifiers are built once at startup and shared behind `Arc<dyn Classifier>`.

pub mod classifier;
pub mod config;
pub mod label;
pub mod moderation;

pub use classifier::Classifier;
pub use config::ModerationConfig;
pub use label::ModerationLabel;
pub use moderation::ModerationClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::config::ModerationConfig;
    pub use crate::label::ModerationLabel;
    pub use crate::moderation::ModerationClassifier;
}
