//! Lexicon-based text moderation classifier
//!
//! Scores every moderation category by counting lexicon hits and reports the
//! full label distribution, most likely label first.

use crate::classifier::Classifier;
use crate::config::ModerationConfig;
use crate::label::ModerationLabel;
use aho_corasick::AhoCorasick;
use textmod_core::{Error, LabelScore, Result};
use tracing::debug;

/// Score contributed by each lexicon hit
const HIT_WEIGHT: f32 = 0.6;

/// Upper bound for a single category before normalisation
const MAX_CATEGORY_SCORE: f32 = 0.95;

/// Text moderation classifier.
///
/// Deterministic and dependency-light: the same text always yields the same
/// scores, so benchmark runs against it are comparable.
pub struct ModerationClassifier {
    name: String,
    max_input_chars: usize,
    lexicons: Vec<(ModerationLabel, Option<AhoCorasick>)>,
}

impl ModerationClassifier {
    /// Create a classifier with the built-in lexicons.
    pub fn new() -> Result<Self> {
        Self::with_config(&ModerationConfig::default())
    }

    /// Create a classifier from configuration.
    pub fn with_config(config: &ModerationConfig) -> Result<Self> {
        if config.max_input_chars == 0 {
            return Err(Error::config("max_input_chars must be greater than zero"));
        }
        if config.extra_terms.contains_key(&ModerationLabel::Ok) {
            return Err(Error::config("the OK label has no lexicon"));
        }

        let mut lexicons = Vec::with_capacity(ModerationLabel::CATEGORIES.len());
        for label in ModerationLabel::CATEGORIES {
            let mut terms: Vec<String> = builtin_terms(label)
                .iter()
                .map(|term| term.to_string())
                .collect();
            if let Some(extra) = config.extra_terms.get(&label) {
                terms.extend(
                    extra
                        .iter()
                        .map(|term| term.trim().to_string())
                        .filter(|term| !term.is_empty()),
                );
            }

            let matcher = if terms.is_empty() {
                None
            } else {
                let matcher = AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&terms)
                    .map_err(|e| {
                        Error::classifier(format!("Failed to build {label} matcher: {e}"))
                    })?;
                Some(matcher)
            };
            lexicons.push((label, matcher));
        }

        Ok(Self {
            name: "moderation".to_string(),
            max_input_chars: config.max_input_chars,
            lexicons,
        })
    }

    fn score(&self, text: &str) -> Vec<LabelScore> {
        let raw: Vec<(ModerationLabel, f32)> = self
            .lexicons
            .iter()
            .map(|(label, matcher)| {
                let hits = matcher
                    .as_ref()
                    .map_or(0, |matcher| matcher.find_iter(text).count());
                (*label, (hits as f32 * HIT_WEIGHT).min(MAX_CATEGORY_SCORE))
            })
            .collect();

        let peak = raw.iter().map(|(_, score)| *score).fold(0.0_f32, f32::max);
        let ok = 1.0 - peak;
        let total = ok + raw.iter().map(|(_, score)| *score).sum::<f32>();

        let mut scores = Vec::with_capacity(ModerationLabel::ALL.len());
        scores.push(LabelScore::new(ModerationLabel::Ok.code(), ok / total));
        scores.extend(
            raw.into_iter()
                .map(|(label, score)| LabelScore::new(label.code(), score / total)),
        );

        // Stable, so ties keep label order.
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores
    }
}

#[async_trait::async_trait]
impl Classifier for ModerationClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>> {
        let length = text.chars().count();
        if length > self.max_input_chars {
            return Err(Error::invalid_input(format!(
                "text has {length} characters, limit is {}",
                self.max_input_chars
            )));
        }

        let scores = self.score(text);
        debug!(
            top = %scores[0].label,
            score = scores[0].score,
            "classified {} characters",
            length
        );
        Ok(scores)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn builtin_terms(label: ModerationLabel) -> &'static [&'static str] {
    match label {
        ModerationLabel::Ok => &[],
        ModerationLabel::Sexual => &["porn", "nude", "naked", "explicit sex", "xxx"],
        ModerationLabel::Hate => &["racist", "bigot", "subhuman", "inferior race", "hate them"],
        ModerationLabel::Violence => &["kill", "shoot", "stab", "attack", "beat you", "punch"],
        ModerationLabel::Harassment => &[
            "stupid", "idiot", "loser", "moron", "shut up", "pathetic", "worthless",
        ],
        ModerationLabel::SelfHarm => &[
            "kill myself",
            "suicide",
            "self harm",
            "self-harm",
            "cut myself",
            "end my life",
        ],
        ModerationLabel::SexualMinors => &[],
        ModerationLabel::HateThreatening => &["should all die", "exterminate", "wipe them out"],
        ModerationLabel::ViolenceGraphic => &["gore", "dismember", "mutilate", "bloodbath"],
    }
}
