use crate::check::HealthCheck;
use crate::result::CheckResult;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use std::time::{Duration, Instant};
use tracing::error;

// Database handshakes are slower than a cache ping; give them more room.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// PostgreSQL connectivity check: connect and run `SELECT 1`.
pub struct PostgresCheck {
    name: String,
    dsn: String,
    timeout: Duration,
}

impl PostgresCheck {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            name: "postgresql".to_string(),
            dsn: dsn.into(),
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
impl HealthCheck for PostgresCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> CheckResult {
        let start = Instant::now();

        let pool = match PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(self.timeout)
            .connect(&self.dsn)
            .await
        {
            Ok(pool) => pool,
            Err(e) => {
                error!("postgresql connection failed: {}", e);
                return CheckResult::unhealthy(
                    self.name.clone(),
                    format!("connection failed: {}", e),
                    start.elapsed().as_millis() as u64,
                );
            }
        };

        let result = sqlx::query("SELECT 1").execute(&pool).await;
        pool.close().await;

        match result {
            Ok(_) => CheckResult::healthy(self.name.clone(), start.elapsed().as_millis() as u64),
            Err(e) => {
                error!("postgresql query failed: {}", e);
                CheckResult::unhealthy(
                    self.name.clone(),
                    format!("query failed: {}", e),
                    start.elapsed().as_millis() as u64,
                )
            }
        }
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.timeout)
    }
}
