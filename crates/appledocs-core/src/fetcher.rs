//! HTTP fetching with timeout, retry, and backoff.
//!
//! All upstream data comes from the Apple Developer documentation site's
//! public JSON and HTML endpoints. The site occasionally throttles or
//! rejects obviously non-browser clients, so every attempt goes out with a
//! User-Agent picked uniformly at random from a pool of realistic browser
//! identifiers. That is an anti-blocking measure, not a correctness one.
//!
//! Retry policy: up to [`MAX_ATTEMPTS`] attempts. A 404 is terminal and
//! never retried; every other non-2xx status and every transport failure is
//! retried with exponential backoff (1s, then 2s). The request timeout is
//! enforced by the reqwest client independently of the retry loop.

use crate::{Error, Result};
use rand::seq::IndexedRandom;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Total attempts per resource, including the first.
const MAX_ATTEMPTS: u32 = 3;

/// Pool of realistic browser identifiers, one chosen per attempt.
const USER_AGENTS: [&str; 8] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.6 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36 Edg/130.0.2849.80",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:132.0) Gecko/20100101 Firefox/132.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36",
];

/// HTTP client for fetching documentation JSON and search HTML.
pub struct Fetcher {
    client: Client,
    base_backoff: Duration,
}

impl Fetcher {
    /// Creates a new fetcher with the standard 30s timeout and 1s backoff.
    pub fn new() -> Result<Self> {
        Self::with_config(Duration::from_secs(30), Duration::from_secs(1))
    }

    /// Creates a fetcher with custom timeout and backoff (primarily for tests).
    pub fn with_config(timeout: Duration, base_backoff: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            client,
            base_backoff,
        })
    }

    /// Fetches a URL and deserializes the response body as JSON.
    ///
    /// A 2xx body that fails to parse is a [`Error::Parse`]; it is not
    /// retried, since the server already answered successfully.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch_with_retries(url).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("invalid JSON from '{url}': {e}")))
    }

    /// Fetches a URL and returns the raw response body.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        self.fetch_with_retries(url).await
    }

    async fn fetch_with_retries(&self, url: &str) -> Result<String> {
        let mut last_err: Option<Error> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.attempt(url).await {
                Ok(body) => {
                    debug!(url, attempt, bytes = body.len(), "fetch succeeded");
                    return Ok(body);
                },
                // A 404 means the resource genuinely does not exist.
                Err(e @ Error::NotFound(_)) => return Err(e),
                Err(e) => {
                    warn!(url, attempt, error = %e, "fetch attempt failed");
                    last_err = Some(e);
                },
            }

            if attempt < MAX_ATTEMPTS {
                let delay = self.base_backoff * 2u32.pow(attempt - 1);
                sleep(delay).await;
            }
        }

        // Surface the last observed error, tagged with the failing URL.
        Err(match last_err {
            Some(Error::Network(e)) if e.is_timeout() => Error::Timeout(format!(
                "request to '{url}' timed out after {MAX_ATTEMPTS} attempts"
            )),
            Some(e) => Error::Other(format!(
                "fetch failed for '{url}' after {MAX_ATTEMPTS} attempts: {e}"
            )),
            None => Error::Other(format!("fetch failed for '{url}'")),
        })
    }

    async fn attempt(&self, url: &str) -> Result<String> {
        let agent = *USER_AGENTS
            .choose(&mut rand::rng())
            .unwrap_or(&USER_AGENTS[0]);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, agent)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Resource not found at '{url}'")));
        }

        if !status.is_success() {
            return match response.error_for_status() {
                // Non-2xx outside the 4xx/5xx ranges, e.g. an unfollowed 3xx.
                Ok(_) => Err(Error::Other(format!(
                    "unexpected status {status} from '{url}'"
                ))),
                Err(err) => Err(Error::Network(err)),
            };
        }

        Ok(response.text().await?)
    }
}
