//! Sample corpora and benchmark requests

use crate::config::BenchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use textmod_core::{Error, Result, Sample};

/// Built-in moderation corpus: clean and flagged texts in a fixed order
const BUILTIN_TEXTS: &[&str] = &[
    "I love you!",
    "Thanks for the quick reply, that fixed my build.",
    "You are a stupid idiot and nobody likes you.",
    "The weather is lovely today, let's go for a walk.",
    "Shut up, you pathetic loser.",
    "Can you recommend a good book about distributed systems?",
    "I will punch you if you say that again.",
    "Our team meeting moved to 3pm on Thursday.",
    "Sometimes I feel like I want to end my life.",
    "The recipe needs two cups of flour and a pinch of salt.",
    "Those racist bigots are subhuman.",
    "Great job on the release, the latency numbers look solid.",
    "The movie was pure gore, they dismember everyone.",
    "Please send the invoice by the end of the week.",
    "They should all die, wipe them out.",
    "What time does the train to the airport leave?",
];

/// A fixed, ordered set of texts
#[derive(Debug, Clone)]
pub struct Corpus {
    texts: Vec<String>,
}

impl Corpus {
    /// The built-in moderation corpus
    pub fn builtin() -> Self {
        Self {
            texts: BUILTIN_TEXTS.iter().map(|text| text.to_string()).collect(),
        }
    }

    pub fn from_texts(texts: Vec<String>) -> Self {
        Self { texts }
    }

    /// Load one text per non-blank line
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let texts = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self { texts })
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Every text once, in order
    pub fn all(&self) -> Vec<Sample> {
        self.texts.iter().map(|text| Sample::new(text.as_str())).collect()
    }

    /// Exactly `count` samples, cycling through the corpus.
    ///
    /// An empty corpus yields no samples.
    pub fn samples(&self, count: usize) -> Vec<Sample> {
        self.texts
            .iter()
            .cycle()
            .take(count)
            .map(|text| Sample::new(text.as_str()))
            .collect()
    }
}

/// What a caller asks the benchmark entry point to run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkRequest {
    /// Number of requests to issue
    #[serde(default)]
    pub count: Option<usize>,

    /// Explicit input texts
    #[serde(default)]
    pub texts: Option<Vec<String>>,
}

impl BenchmarkRequest {
    /// Resolve the request into the samples of one run.
    ///
    /// - texts only: those texts, once each
    /// - count only: the built-in corpus cycled to `count`
    /// - both: the texts cycled to `count`
    /// - neither: the built-in corpus cycled to the configured default
    pub fn resolve(&self, config: &BenchConfig) -> Result<Vec<Sample>> {
        let samples = match (&self.texts, self.count) {
            (Some(texts), None) => {
                check_count(texts.len(), config)?;
                Corpus::from_texts(texts.clone()).all()
            }
            (Some(texts), Some(count)) => {
                check_count(count, config)?;
                Corpus::from_texts(texts.clone()).samples(count)
            }
            (None, count) => {
                let count = count.unwrap_or(config.default_requests);
                check_count(count, config)?;
                Corpus::builtin().samples(count)
            }
        };
        Ok(samples)
    }
}

fn check_count(count: usize, config: &BenchConfig) -> Result<()> {
    if count > config.max_requests {
        return Err(Error::invalid_input(format!(
            "{count} requests exceeds the limit of {}",
            config.max_requests
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_samples_cycle_corpus() {
        let corpus = Corpus::from_texts(vec!["a".into(), "b".into()]);
        let samples = corpus.samples(5);

        let texts: Vec<&str> = samples.iter().map(Sample::text).collect();
        assert_eq!(texts, vec!["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn test_empty_corpus_yields_nothing() {
        assert!(Corpus::from_texts(vec![]).samples(10).is_empty());
    }

    #[test]
    fn test_resolve_defaults_to_builtin() {
        let config = BenchConfig::default();
        let samples = BenchmarkRequest::default().resolve(&config).unwrap();

        assert_eq!(samples.len(), config.default_requests);
        assert_eq!(samples[0].text(), BUILTIN_TEXTS[0]);
    }

    #[test]
    fn test_resolve_texts_with_and_without_count() {
        let config = BenchConfig::default();
        let texts = vec!["one".to_string(), "two".to_string(), "three".to_string()];

        let request = BenchmarkRequest {
            count: None,
            texts: Some(texts.clone()),
        };
        assert_eq!(request.resolve(&config).unwrap().len(), 3);

        let request = BenchmarkRequest {
            count: Some(7),
            texts: Some(texts),
        };
        let samples = request.resolve(&config).unwrap();
        assert_eq!(samples.len(), 7);
        assert_eq!(samples[6].text(), "one");
    }

    #[test]
    fn test_resolve_zero_count_is_empty_run() {
        let request = BenchmarkRequest {
            count: Some(0),
            texts: None,
        };
        assert!(request.resolve(&BenchConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_rejects_oversized_count() {
        let config = BenchConfig {
            max_requests: 10,
            ..Default::default()
        };
        let request = BenchmarkRequest {
            count: Some(11),
            texts: None,
        };
        assert!(matches!(request.resolve(&config), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_corpus_from_file_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first line\n\n   \nsecond line").unwrap();

        let corpus = Corpus::from_file(file.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.all()[1].text(), "second line");
    }
}
