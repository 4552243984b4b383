use crate::check::HealthCheck;
use crate::result::CheckResult;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{error, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP reachability check: GET the URL and judge the status code.
///
/// Server errors are unhealthy; client errors are degraded (the endpoint is
/// up but answered unexpectedly, e.g. an auth-protected URL).
pub struct HttpCheck {
    name: String,
    url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpCheck {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HealthCheck for HttpCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> CheckResult {
        let start = Instant::now();

        match self.client.get(&self.url).send().await {
            Ok(response) => {
                let elapsed = start.elapsed().as_millis() as u64;
                let status = response.status();

                if status.is_server_error() {
                    error!("http check {} returned {}", self.url, status);
                    CheckResult::unhealthy(
                        self.name.clone(),
                        format!("status {}", status),
                        elapsed,
                    )
                } else if status.is_client_error() {
                    warn!("http check {} returned {}", self.url, status);
                    CheckResult::degraded(self.name.clone(), format!("status {}", status), elapsed)
                } else {
                    CheckResult::healthy(self.name.clone(), elapsed)
                }
            }
            Err(e) => {
                error!("http check {} failed: {}", self.url, e);
                CheckResult::unhealthy(
                    self.name.clone(),
                    format!("request failed: {}", e),
                    start.elapsed().as_millis() as u64,
                )
            }
        }
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let check = HttpCheck::new("upstream", "http://localhost:9999/ping");
        assert_eq!(check.name(), "upstream");
        assert_eq!(check.timeout(), Some(Duration::from_secs(2)));
    }
}
