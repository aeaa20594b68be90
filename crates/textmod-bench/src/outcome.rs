//! Per-sample dispatch outcome

use std::time::Duration;
use textmod_core::LabelScore;

/// Result of dispatching one sample
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The classification came back well formed
    Success {
        latency: Duration,
        labels: Vec<LabelScore>,
    },

    /// The dispatch failed. `latency` is `None` when the call produced no
    /// measurement (timeout fired, or the dispatch task was aborted).
    Failure {
        latency: Option<Duration>,
        error: String,
    },
}

impl Outcome {
    /// Create a success outcome
    pub fn success(latency: Duration, labels: Vec<LabelScore>) -> Self {
        Self::Success { latency, labels }
    }

    /// Create a failure outcome
    pub fn failure(latency: Option<Duration>, error: impl Into<String>) -> Self {
        Self::Failure {
            latency,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Measured latency of the call, if any
    pub fn latency(&self) -> Option<Duration> {
        match self {
            Self::Success { latency, .. } => Some(*latency),
            Self::Failure { latency, .. } => *latency,
        }
    }

    /// Latency in milliseconds of a successful call; `None` for failures
    pub fn success_latency_ms(&self) -> Option<f64> {
        match self {
            Self::Success { latency, .. } => Some(duration_ms(*latency)),
            Self::Failure { .. } => None,
        }
    }

    /// Error description of a failed call
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

/// Milliseconds as `f64`, divided from whole nanoseconds
pub(crate) fn duration_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}
