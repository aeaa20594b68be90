//! textmod Core
//!
//! Core types and utilities shared across textmod components.
//!
//! This crate provides:
//! - The input unit submitted for classification (`Sample`)
//! - The `(label, score)` pairs a classifier answers with (`LabelScore`)
//! - Validation of classification results
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{validate_labels, LabelScore, Sample};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{validate_labels, LabelScore, Sample};
}
