use crate::check::HealthCheck;
use crate::result::CheckResult;
use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::{Duration, Instant};
use tracing::error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis connectivity check: open a multiplexed async connection and PING.
pub struct RedisCheck {
    name: String,
    client: Result<redis::Client, redis::RedisError>,
    timeout: Duration,
}

impl RedisCheck {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            name: "redis".to_string(),
            client: redis::Client::open(url.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HealthCheck for RedisCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> CheckResult {
        let start = Instant::now();

        let client = match &self.client {
            Ok(client) => client,
            Err(e) => {
                return CheckResult::unhealthy(self.name.clone(), format!("invalid redis url: {}", e), 0);
            }
        };

        match client.get_multiplexed_async_connection().await {
            Ok(mut conn) => match conn.ping::<String>().await {
                Ok(_) => {
                    CheckResult::healthy(self.name.clone(), start.elapsed().as_millis() as u64)
                }
                Err(e) => {
                    error!("redis ping failed: {}", e);
                    CheckResult::unhealthy(
                        self.name.clone(),
                        format!("ping failed: {}", e),
                        start.elapsed().as_millis() as u64,
                    )
                }
            },
            Err(e) => {
                error!("redis connection failed: {}", e);
                CheckResult::unhealthy(
                    self.name.clone(),
                    format!("connection failed: {}", e),
                    start.elapsed().as_millis() as u64,
                )
            }
        }
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.timeout)
    }
}
