use crate::check::HealthCheck;
use crate::health::Entry;
use crate::result::{CheckResult, HealthStatus};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Run every entry concurrently, each bounded by its effective timeout.
///
/// Results come back in registration order regardless of completion order,
/// and this function never fails: a check that errors, panics, or hangs is
/// reported as an unhealthy result instead.
pub(crate) async fn run_entries(entries: &[Entry], default_timeout: Duration) -> Vec<CheckResult> {
    let futures = entries.iter().map(|entry| {
        run_one(
            entry.name.clone(),
            Arc::clone(&entry.check),
            entry.timeout.unwrap_or(default_timeout),
        )
    });

    // join_all preserves input order, so output order is registration order.
    join_all(futures).await
}

async fn run_one(name: String, check: Arc<dyn HealthCheck>, timeout: Duration) -> CheckResult {
    debug!(
        check = %name,
        timeout_ms = timeout.as_millis() as u64,
        "running health check"
    );

    let start = Instant::now();

    // The check runs in its own task: a panic is isolated there, and the
    // task keeps the stuck I/O away from this run once we stop waiting.
    let mut handle = tokio::spawn(async move { check.check().await });

    match tokio::time::timeout(timeout, &mut handle).await {
        Ok(Ok(mut result)) => {
            // Never trust a check's own measurement.
            result.duration_ms = start.elapsed().as_millis() as u64;

            match result.status {
                HealthStatus::Healthy => {
                    debug!(check = %name, duration_ms = result.duration_ms, "health check passed");
                }
                HealthStatus::Degraded => {
                    warn!(
                        check = %name,
                        message = result.message.as_deref().unwrap_or(""),
                        "health check degraded"
                    );
                }
                HealthStatus::Unhealthy => {
                    error!(
                        check = %name,
                        message = result.message.as_deref().unwrap_or(""),
                        "health check failed"
                    );
                }
            }

            result
        }
        Ok(Err(join_err)) => {
            let elapsed = start.elapsed().as_millis() as u64;
            error!(check = %name, "health check panicked: {join_err}");
            CheckResult::unhealthy(name, format!("check panicked: {join_err}"), elapsed)
        }
        Err(_) => {
            // Stop waiting and cancel the task at its next await point. The
            // abandoned check can never touch results already returned.
            handle.abort();
            error!(check = %name, timeout_ms = timeout.as_millis() as u64, "health check timed out");
            CheckResult::unhealthy(name, "timeout", timeout.as_millis() as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::check_fn;

    fn entry(name: &str, check: impl HealthCheck + 'static, timeout: Option<Duration>) -> Entry {
        Entry {
            name: name.to_string(),
            check: Arc::new(check),
            timeout,
        }
    }

    #[tokio::test]
    async fn test_empty_entries_yield_no_results() {
        let results = run_entries(&[], Duration::from_secs(2)).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_executor_overwrites_duration() {
        let entries = vec![entry(
            "lying",
            check_fn("lying", || async {
                // Claims an absurd duration; the executor must replace it.
                CheckResult::healthy("lying", 999_999)
            }),
            None,
        )];

        let results = run_entries(&entries, Duration::from_secs(2)).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].duration_ms < 1_000);
    }

    #[tokio::test]
    async fn test_panicking_check_is_contained() {
        let entries = vec![
            entry(
                "boom",
                check_fn("boom", || async { panic!("probe exploded") }),
                None,
            ),
            entry(
                "fine",
                check_fn("fine", || async { CheckResult::healthy("fine", 0) }),
                None,
            ),
        ];

        let results = run_entries(&entries, Duration::from_secs(2)).await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, HealthStatus::Unhealthy);
        assert!(results[0].message.is_some());
        assert_eq!(results[1].status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn test_timeout_produces_synthetic_result() {
        let entries = vec![entry(
            "stuck",
            check_fn("stuck", || async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                CheckResult::healthy("stuck", 0)
            }),
            Some(Duration::from_millis(50)),
        )];

        let start = Instant::now();
        let results = run_entries(&entries, Duration::from_secs(2)).await;
        let wall = start.elapsed();

        assert_eq!(results[0].status, HealthStatus::Unhealthy);
        assert_eq!(results[0].message.as_deref(), Some("timeout"));
        assert_eq!(results[0].duration_ms, 50);
        // run() gives up at the timeout, not at the check's real runtime.
        assert!(wall < Duration::from_secs(1), "took {wall:?}");
    }

    #[tokio::test]
    async fn test_results_preserve_registration_order() {
        let entries = vec![
            entry(
                "slow",
                check_fn("slow", || async {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    CheckResult::healthy("slow", 0)
                }),
                None,
            ),
            entry(
                "fast",
                check_fn("fast", || async { CheckResult::healthy("fast", 0) }),
                None,
            ),
        ];

        let results = run_entries(&entries, Duration::from_secs(2)).await;
        assert_eq!(results[0].name, "slow");
        assert_eq!(results[1].name, "fast");
    }

    #[tokio::test]
    async fn test_checks_run_concurrently() {
        let entries: Vec<Entry> = (0..4)
            .map(|i| {
                entry(
                    &format!("sleeper-{i}"),
                    check_fn(format!("sleeper-{i}"), || async {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        CheckResult::healthy("sleeper", 0)
                    }),
                    None,
                )
            })
            .collect();

        let start = Instant::now();
        let results = run_entries(&entries, Duration::from_secs(2)).await;
        let wall = start.elapsed();

        assert_eq!(results.len(), 4);
        // Four 100ms sleeps fanned out should take ~100ms, not ~400ms.
        assert!(wall < Duration::from_millis(300), "took {wall:?}");
    }
}
