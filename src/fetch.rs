use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::error::{Error, Result};

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Narrow contract the transcript pipeline needs from the network layer.
///
/// The orchestrator issues exactly two fetches per call (watch page, then
/// caption XML) and never retries on its own; retry behavior belongs to the
/// implementation behind this trait.
#[async_trait]
pub trait Fetch {
    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String>;
}

/// Retry schedule for transient network failures.
///
/// Exponential backoff: `base_delay * 2^attempt`, capped at `max_delay`.
/// HTTP status errors (4xx/5xx) are never retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay before re-running the given zero-based failed attempt.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }

    /// Whether the error is a transient network failure worth retrying.
    pub fn is_transient(&self, err: &reqwest::Error) -> bool {
        if err.is_status() {
            return false;
        }
        err.is_connect() || err.is_timeout() || err.is_request()
    }
}

/// HTTP fetcher backed by reqwest, retrying per its [`RetryPolicy`].
pub struct Fetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: reqwest::Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    async fn try_fetch(&self, url: &str, query: &[(&str, &str)]) -> std::result::Result<String, reqwest::Error> {
        debug!("Fetching URL: {url}");
        let mut request = self.client.get(url).header("User-Agent", USER_AGENT);
        if !query.is_empty() {
            request = request.query(query);
        }
        request.send().await?.error_for_status()?.text().await
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), RetryPolicy::default())
    }
}

#[async_trait]
impl Fetch for Fetcher {
    async fn fetch(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(url, query).await {
                Ok(body) => return Ok(body),
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.policy.max_attempts || !self.policy.is_transient(&err) {
                        return Err(Error::Http(err));
                    }
                    let delay = self.policy.backoff(attempt - 1);
                    debug!("Attempt {attempt} failed: {err}, retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
