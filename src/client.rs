//! Shared HTTP client for all external lookups.
//!
//! One client instance is shared by the geocoder and both page scrapers so
//! the minimum-interval rate limit applies across the whole fetch cycle, not
//! per component. Transport failures and non-success statuses both surface as
//! [`WxError::Fetch`]; no retries are performed.

use crate::{Result, WxError};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// HTTP client with a request timeout and a minimum interval between
/// outbound requests.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpClient {
    /// Create a new client with the given identifier, timeout, and minimum
    /// request interval.
    pub fn new(user_agent: &str, timeout: Duration, min_interval: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| WxError::fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            min_interval,
            last_request: Mutex::new(None),
        })
    }

    /// Wait out the remaining interval since the previous request, then
    /// record this one. Holding the lock across the sleep serializes
    /// concurrent callers.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Fetch a page and return its body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        self.throttle().await;
        debug!("GET {url}");

        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WxError::fetch(format!("{url} returned status {status}")));
        }

        let body = response.text().await?;

        let elapsed = start.elapsed();
        if elapsed > Duration::from_secs(5) {
            warn!("Slow response from {url}: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(body)
    }

    /// Fetch a JSON endpoint and deserialize the response body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.throttle().await;
        debug!("GET {url}");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WxError::fetch(format!("{url} returned status {status}")));
        }

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| WxError::fetch(format!("failed to parse response from {url}: {e}")))?;

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_throttle_enforces_minimum_interval() {
        let client = HttpClient::new(
            "wxboard-test",
            Duration::from_secs(10),
            Duration::from_millis(50),
        )
        .expect("client should build");

        let start = Instant::now();
        client.throttle().await;
        client.throttle().await;
        client.throttle().await;

        // Three requests spaced 50ms apart need at least 100ms total.
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_first_request_is_not_delayed() {
        let client = HttpClient::new(
            "wxboard-test",
            Duration::from_secs(10),
            Duration::from_secs(60),
        )
        .expect("client should build");

        let start = Instant::now();
        client.throttle().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
