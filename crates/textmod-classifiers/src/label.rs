//! Moderation label set

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Labels produced by the moderation classifier, serialized by their short code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModerationLabel {
    /// Nothing objectionable
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "S")]
    Sexual,
    #[serde(rename = "H")]
    Hate,
    #[serde(rename = "V")]
    Violence,
    #[serde(rename = "HR")]
    Harassment,
    #[serde(rename = "SH")]
    SelfHarm,
    #[serde(rename = "S3")]
    SexualMinors,
    #[serde(rename = "H2")]
    HateThreatening,
    #[serde(rename = "V2")]
    ViolenceGraphic,
}

impl ModerationLabel {
    /// Every label, `OK` first
    pub const ALL: [ModerationLabel; 9] = [
        Self::Ok,
        Self::Sexual,
        Self::Hate,
        Self::Violence,
        Self::Harassment,
        Self::SelfHarm,
        Self::SexualMinors,
        Self::HateThreatening,
        Self::ViolenceGraphic,
    ];

    /// Labels that flag content (everything except `OK`)
    pub const CATEGORIES: [ModerationLabel; 8] = [
        Self::Sexual,
        Self::Hate,
        Self::Violence,
        Self::Harassment,
        Self::SelfHarm,
        Self::SexualMinors,
        Self::HateThreatening,
        Self::ViolenceGraphic,
    ];

    /// Short code used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Sexual => "S",
            Self::Hate => "H",
            Self::Violence => "V",
            Self::Harassment => "HR",
            Self::SelfHarm => "SH",
            Self::SexualMinors => "S3",
            Self::HateThreatening => "H2",
            Self::ViolenceGraphic => "V2",
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Ok => "not offensive",
            Self::Sexual => "sexual",
            Self::Hate => "hate",
            Self::Violence => "violence",
            Self::Harassment => "harassment",
            Self::SelfHarm => "self-harm",
            Self::SexualMinors => "sexual/minors",
            Self::HateThreatening => "hate/threatening",
            Self::ViolenceGraphic => "violence/graphic",
        }
    }
}

impl fmt::Display for ModerationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ModerationLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|label| label.code().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown moderation label: {s}"))
    }
}
