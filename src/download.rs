//! Downloads report and history pages, retrying transient failures.

use std::time::Duration;

use anyhow::{Error, Result};
use reqwest::{Client, StatusCode, Url};

const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Shared HTTP client with a bounded retry policy.
pub struct Downloader {
    client: Client,
    retries: u32,
    backoff: Duration,
}

impl Downloader {
    pub fn new(retries: u32) -> Self {
        Downloader {
            client: Client::new(),
            retries,
            backoff: DEFAULT_BACKOFF,
        }
    }

    #[cfg(test)]
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Fetches the body of `url` as text.
    ///
    /// Transport errors, server errors and rate limiting are retried up to
    /// `retries` times with exponential backoff. Any other failure, or the
    /// last retryable one, is returned.
    pub async fn get_text(&self, url: &Url) -> Result<String> {
        let mut attempt = 0;

        loop {
            tracing::debug!(%url, attempt, "requesting");

            match self.try_get_text(url).await {
                Ok(body) => return Ok(body),
                Err(err) if attempt < self.retries && is_retryable(&err) => {
                    let delay = backoff_delay(self.backoff, attempt);
                    tracing::warn!(%url, "request failed ({}), retrying in {:?}", err, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(Error::new(err).context(format!("Failed to download {}", url)))
                }
            }
        }
    }

    async fn try_get_text(&self, url: &Url) -> reqwest::Result<String> {
        self.client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

fn is_retryable(err: &reqwest::Error) -> bool {
    match err.status() {
        Some(status) => status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS,
        None => !err.is_builder(),
    }
}

/// Delay before retry number `attempt + 1`: `base * 2^attempt`.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(1 << attempt.min(16))
}

// -- Tests -------------------------------------------------------------------
