use crate::check::HealthCheck;
use crate::result::CheckResult;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tracing::error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Bare TCP connect check, for brokers and anything else where reaching the
/// port is a good enough liveness signal (RabbitMQ, Kafka, SMTP, ...).
pub struct TcpCheck {
    name: String,
    addr: String,
    timeout: Duration,
}

impl TcpCheck {
    pub fn new(name: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addr: addr.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HealthCheck for TcpCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> CheckResult {
        let start = Instant::now();

        match TcpStream::connect(&self.addr).await {
            Ok(_) => CheckResult::healthy(self.name.clone(), start.elapsed().as_millis() as u64),
            Err(e) => {
                error!("tcp check {} failed: {}", self.addr, e);
                CheckResult::unhealthy(
                    self.name.clone(),
                    format!("connect failed: {}", e),
                    start.elapsed().as_millis() as u64,
                )
            }
        }
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.timeout)
    }
}
