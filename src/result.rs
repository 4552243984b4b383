use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health status of a single check or of the whole service, ordered by
/// severity: `Healthy < Degraded < Unhealthy`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Outcome of one check execution. Plain data, created fresh on every run.
///
/// `duration_ms` is always overwritten by the executor with its own
/// measurement; a check cannot misreport its cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl CheckResult {
    pub fn healthy(name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Healthy,
            message: None,
            checked_at: Utc::now(),
            duration_ms,
        }
    }

    pub fn degraded(name: impl Into<String>, message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            checked_at: Utc::now(),
            duration_ms,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            checked_at: Utc::now(),
            duration_ms,
        }
    }
}

/// Reduce a set of results to one overall status: the worst status wins.
/// An empty slice is `Healthy` — there is no failing dependency.
pub fn overall_status(results: &[CheckResult]) -> HealthStatus {
    results
        .iter()
        .map(|r| r.status)
        .max()
        .unwrap_or(HealthStatus::Healthy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering() {
        assert!(HealthStatus::Healthy < HealthStatus::Degraded);
        assert!(HealthStatus::Degraded < HealthStatus::Unhealthy);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
        assert_eq!(HealthStatus::Degraded.to_string(), "degraded");
    }

    #[test]
    fn test_check_result_constructors() {
        let result = CheckResult::healthy("redis", 12);
        assert_eq!(result.status, HealthStatus::Healthy);
        assert_eq!(result.duration_ms, 12);
        assert!(result.message.is_none());

        let result = CheckResult::degraded("ldap", "slow", 200);
        assert_eq!(result.status, HealthStatus::Degraded);
        assert_eq!(result.message.as_deref(), Some("slow"));

        let result = CheckResult::unhealthy("postgresql", "connection refused", 30);
        assert_eq!(result.status, HealthStatus::Unhealthy);
        assert!(result.message.is_some());
    }

    #[test]
    fn test_overall_status_unhealthy_wins() {
        let results = vec![
            CheckResult::healthy("a", 1),
            CheckResult::unhealthy("b", "down", 2),
            CheckResult::degraded("c", "slow", 3),
        ];
        assert_eq!(overall_status(&results), HealthStatus::Unhealthy);
    }

    #[test]
    fn test_overall_status_degraded_without_unhealthy() {
        let results = vec![
            CheckResult::healthy("a", 1),
            CheckResult::degraded("b", "slow", 2),
        ];
        assert_eq!(overall_status(&results), HealthStatus::Degraded);
    }

    #[test]
    fn test_overall_status_order_independent() {
        let mut results = vec![
            CheckResult::unhealthy("a", "down", 1),
            CheckResult::healthy("b", 1),
            CheckResult::degraded("c", "slow", 1),
        ];
        let expected = overall_status(&results);
        results.reverse();
        assert_eq!(overall_status(&results), expected);
        results.swap(0, 1);
        assert_eq!(overall_status(&results), expected);
    }

    #[test]
    fn test_overall_status_empty_is_healthy() {
        assert_eq!(overall_status(&[]), HealthStatus::Healthy);
    }
}
