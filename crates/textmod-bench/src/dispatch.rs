//! Dispatchers: how a sample reaches the classifier

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use textmod_classifiers::Classifier;
use textmod_core::{Error, LabelScore, Result, Sample};

/// Sends one sample to a classifier and returns its answer
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Dispatch a single sample
    async fn dispatch(&self, sample: &Sample) -> Result<Vec<LabelScore>>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Calls a long-lived classifier directly, measuring computation latency only
pub struct InProcessDispatcher {
    classifier: Arc<dyn Classifier>,
    name: String,
}

impl InProcessDispatcher {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        let name = format!("in-process:{}", classifier.name());
        Self { classifier, name }
    }
}

#[async_trait]
impl Dispatcher for InProcessDispatcher {
    async fn dispatch(&self, sample: &Sample) -> Result<Vec<LabelScore>> {
        self.classifier.classify(sample.text()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

/// Posts samples to a running service's `/classify` endpoint
pub struct HttpDispatcher {
    client: reqwest::Client,
    endpoint: String,
    name: String,
}

impl HttpDispatcher {
    /// Create a dispatcher targeting `base_url` (e.g. `http://127.0.0.1:8000`).
    ///
    /// `request_timeout` bounds each HTTP exchange at the transport level.
    pub fn new(base_url: &str, request_timeout: Option<Duration>) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::config(format!(
                "target url must start with http:// or https://, got '{base_url}'"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{base}/classify"),
            name: format!("http:{base}"),
        })
    }

    /// Full URL samples are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(&self, sample: &Sample) -> Result<Vec<LabelScore>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest {
                text: sample.text(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::unavailable(format!(
                "{} returned {}",
                self.endpoint, status
            )));
        }

        response
            .json::<Vec<LabelScore>>()
            .await
            .map_err(|e| Error::malformed(format!("undecodable response body: {e}")))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
