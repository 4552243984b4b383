use crate::result::CheckResult;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;
use std::time::Duration;

/// A single dependency check.
///
/// Implementations connect to one external dependency, issue a trivial
/// command, and report the outcome as a [`CheckResult`]. The orchestrator
/// never looks inside a check; it only runs it under a timeout.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Name of the check, used as the result name.
    fn name(&self) -> &str;

    /// Perform the check.
    async fn check(&self) -> CheckResult;

    /// Per-check timeout; `None` falls back to the registry default.
    fn timeout(&self) -> Option<Duration> {
        None
    }
}

struct FnCheck {
    name: String,
    f: Box<dyn Fn() -> BoxFuture<'static, CheckResult> + Send + Sync>,
}

#[async_trait]
impl HealthCheck for FnCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> CheckResult {
        (self.f)().await
    }
}

/// Wrap an async closure as a [`HealthCheck`], for ad-hoc checks that do
/// not warrant a dedicated type.
pub fn check_fn<F, Fut>(name: impl Into<String>, f: F) -> impl HealthCheck
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CheckResult> + Send + 'static,
{
    FnCheck {
        name: name.into(),
        f: Box::new(move || Box::pin(f())),
    }
}
