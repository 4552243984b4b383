use crate::check::{check_fn, HealthCheck};
use crate::checks::{HttpCheck, PostgresCheck, RedisCheck, TcpCheck};
use crate::executor;
use crate::result::CheckResult;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Registry-wide default timeout for checks that do not carry their own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// One registered check: its name, the check itself, and an optional
/// timeout override captured at registration time.
pub(crate) struct Entry {
    pub(crate) name: String,
    pub(crate) check: Arc<dyn HealthCheck>,
    pub(crate) timeout: Option<Duration>,
}

/// Ordered registry of health checks and the entry point for running them.
///
/// Registration is builder-style and chainable; duplicate names are
/// permitted and appear as independent entries. Register everything up
/// front, then call [`run`](Health::run) as often as needed (share behind
/// an `Arc` for handlers).
pub struct Health {
    entries: Vec<Entry>,
    default_timeout: Duration,
}

impl Health {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the registry-wide default timeout.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Register a check. Its name and own timeout (if any) are captured now.
    pub fn register(mut self, check: impl HealthCheck + 'static) -> Self {
        let name = check.name().to_string();
        let timeout = check.timeout();
        debug!(check = %name, "registered health check");
        self.entries.push(Entry {
            name,
            check: Arc::new(check),
            timeout,
        });
        self
    }

    /// Register a check with an explicit timeout, overriding both the
    /// check's own timeout and the registry default.
    pub fn register_with_timeout(
        mut self,
        check: impl HealthCheck + 'static,
        timeout: Duration,
    ) -> Self {
        let name = check.name().to_string();
        debug!(check = %name, timeout_ms = timeout.as_millis() as u64, "registered health check");
        self.entries.push(Entry {
            name,
            check: Arc::new(check),
            timeout: Some(timeout),
        });
        self
    }

    /// Register an ad-hoc async closure as a check.
    pub fn register_fn<F, Fut>(self, name: impl Into<String> + 'static, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CheckResult> + Send + 'static,
    {
        self.register(check_fn(name, f))
    }

    /// Register a Redis PING check.
    pub fn redis_check(self, url: impl Into<String>) -> Self {
        self.register(RedisCheck::new(url))
    }

    /// Register a PostgreSQL `SELECT 1` check.
    pub fn postgres_check(self, dsn: impl Into<String>) -> Self {
        self.register(PostgresCheck::new(dsn))
    }

    /// Register an HTTP reachability check.
    pub fn http_check(self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.register(HttpCheck::new(name, url))
    }

    /// Register a TCP connect check (brokers and other port-only probes).
    pub fn tcp_check(self, name: impl Into<String>, addr: impl Into<String>) -> Self {
        self.register(TcpCheck::new(name, addr))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every registered check concurrently and collect one result per
    /// entry, in registration order. Never fails: check errors, panics, and
    /// timeouts all surface as unhealthy results.
    pub async fn run(&self) -> Vec<CheckResult> {
        executor::run_entries(&self.entries, self.default_timeout).await
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new()
    }
}
