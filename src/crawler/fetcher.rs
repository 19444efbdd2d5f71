//! HTTP fetcher with bounded retry and a global concurrency ceiling
//!
//! Redirects are never followed: a 301/302 is data to the classifier, not a
//! hop to take. Transient classifications are retried a configured number of
//! times with a fixed delay; exhausting the attempts returns the final
//! transient classification so the caller can abandon the branch.

use crate::config::HttpConfig;
use crate::crawler::classify::{classify, classify_transport, Classification};
use crate::CrawlError;
use reqwest::{redirect::Policy, Client};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Issues classified fetches against the upstream document API
pub struct Fetcher {
    client: Client,
    permits: Arc<Semaphore>,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Builds the HTTP client and concurrency gate from configuration
    pub fn new(config: &HttpConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::none())
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(config.max_concurrent_fetches as usize)),
            retry_attempts: config.retry_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Fetches a URL and classifies the exchange
    ///
    /// Holds a concurrency permit for the duration of each attempt, so the
    /// configured ceiling bounds in-flight requests across all branches.
    pub async fn fetch(&self, url: &Url) -> Classification {
        let mut last = Classification::Transient {
            reason: "no attempt made".to_string(),
        };

        for attempt in 1..=self.retry_attempts {
            let classification = self.fetch_once(url).await;

            if !classification.is_transient() {
                return classification;
            }

            if let Classification::Transient { reason } = &classification {
                tracing::debug!(
                    url = %url,
                    attempt,
                    max_attempts = self.retry_attempts,
                    reason = %reason,
                    "Transient fetch failure"
                );
            }
            last = classification;

            if attempt < self.retry_attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        last
    }

    async fn fetch_once(&self, url: &Url) -> Classification {
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                return Classification::Transient {
                    reason: "fetch pool closed".to_string(),
                }
            }
        };

        match self.client.get(url.clone()).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if response.status().is_success() {
                    match response.text().await {
                        Ok(body) => classify(status, Some(body)),
                        Err(e) => classify_transport(&e),
                    }
                } else {
                    classify(status, None)
                }
            }
            Err(e) => classify_transport(&e),
        }
    }
}
