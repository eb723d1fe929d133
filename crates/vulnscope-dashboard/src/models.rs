//! View models for the dashboard pages.
//!
//! These are the shapes the data sources produce and the pages hold; the
//! rendering layer reads them by clone. All fields are owned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open-vulnerability counts bucketed by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

impl SeverityCounts {
    pub fn total(&self) -> u64 {
        self.critical + self.high + self.medium + self.low
    }
}

/// One refresh of the main dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub severity: SeverityCounts,
    pub open_vulnerabilities: u64,
    pub new_this_week: u64,
    pub patched_this_week: u64,
    pub top_affected_systems: Vec<String>,
    /// Server-side generation time, distinct from the poll status's
    /// fetch-completion time.
    pub generated_at: DateTime<Utc>,
}

/// A single row in the user dashboard's activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: String,
    pub action: String,
    pub detail: String,
    pub occurred_at: DateTime<Utc>,
}

/// One refresh of the user dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivitySnapshot {
    pub recent_activity: Vec<ActivityEntry>,
    pub bookmark_count: u64,
    pub alert_rule_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_total_sums_all_buckets() {
        let counts = SeverityCounts {
            critical: 3,
            high: 10,
            medium: 25,
            low: 7,
        };
        assert_eq!(counts.total(), 45);
    }

    #[test]
    fn test_severity_default_is_empty() {
        assert_eq!(SeverityCounts::default().total(), 0);
    }

    #[test]
    fn test_dashboard_snapshot_serializes_with_expected_keys() {
        let snapshot = DashboardSnapshot {
            severity: SeverityCounts::default(),
            open_vulnerabilities: 42,
            new_this_week: 5,
            patched_this_week: 3,
            top_affected_systems: vec!["web-frontend".to_string()],
            generated_at: Utc::now(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["open_vulnerabilities"], 42);
        assert_eq!(json["severity"]["critical"], 0);
        assert_eq!(json["top_affected_systems"][0], "web-frontend");
        assert!(json["generated_at"].is_string());
    }
}
