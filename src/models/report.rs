use serde_json::{json, Value};

/// Marker rendered in API responses when a scanner has nothing outstanding.
/// These exact strings are part of the public response contract.
pub const CODEQL_CLEAR: &str = "✅ No CodeQL alerts";
pub const DEPENDABOT_CLEAR: &str = "✅ No Dependabot alerts";

/// Outcome of one alert-listing call
#[derive(Debug, Clone, PartialEq)]
pub enum AlertStatus {
    Clear,
    Alerts(Vec<Value>),
}

impl AlertStatus {
    /// Collapses an alert list into the status, treating an empty list as clear
    pub fn from_alerts(alerts: Vec<Value>) -> Self {
        if alerts.is_empty() {
            AlertStatus::Clear
        } else {
            AlertStatus::Alerts(alerts)
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, AlertStatus::Clear)
    }

    fn to_json(&self, clear_marker: &str) -> Value {
        match self {
            AlertStatus::Clear => json!(clear_marker),
            AlertStatus::Alerts(alerts) => json!(alerts),
        }
    }
}

/// Per-repository snapshot of both scanners, computed per request and never stored
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityReport {
    pub repo_full_name: String,
    pub outcome: ReportOutcome,
}

/// A report either carries both alert statuses or a single opaque error.
/// Upstream failure causes are deliberately not distinguished.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Fetched {
        codeql: AlertStatus,
        dependabot: AlertStatus,
    },
    Failed {
        error: String,
    },
}

impl SecurityReport {
    pub fn fetched(
        repo_full_name: impl Into<String>,
        codeql: AlertStatus,
        dependabot: AlertStatus,
    ) -> Self {
        Self {
            repo_full_name: repo_full_name.into(),
            outcome: ReportOutcome::Fetched { codeql, dependabot },
        }
    }

    pub fn failed(repo_full_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            repo_full_name: repo_full_name.into(),
            outcome: ReportOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Renders the wire shape: `{repoFullName, codeql, dependabot}` for a
    /// fetched report, `{repoFullName, error}` for a failed one
    pub fn to_response(&self) -> Value {
        match &self.outcome {
            ReportOutcome::Fetched { codeql, dependabot } => json!({
                "repoFullName": self.repo_full_name,
                "codeql": codeql.to_json(CODEQL_CLEAR),
                "dependabot": dependabot.to_json(DEPENDABOT_CLEAR),
            }),
            ReportOutcome::Failed { error } => json!({
                "repoFullName": self.repo_full_name,
                "error": error,
            }),
        }
    }
}

/// Safe/unsafe classification derived from a SecurityReport
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub repo_full_name: String,
    pub safe_to_use: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_alert_list_is_clear() {
        assert_eq!(AlertStatus::from_alerts(vec![]), AlertStatus::Clear);
    }

    #[test]
    fn test_non_empty_alert_list_is_not_clear() {
        let status = AlertStatus::from_alerts(vec![json!({"number": 1})]);
        assert!(!status.is_clear());
    }

    #[test]
    fn test_clear_report_serializes_with_markers() {
        let report = SecurityReport::fetched("octo/widgets", AlertStatus::Clear, AlertStatus::Clear);

        assert_eq!(
            report.to_response(),
            json!({
                "repoFullName": "octo/widgets",
                "codeql": "✅ No CodeQL alerts",
                "dependabot": "✅ No Dependabot alerts",
            })
        );
    }

    #[test]
    fn test_alerts_serialize_as_raw_list() {
        let alert = json!({"number": 7, "state": "open"});
        let report = SecurityReport::fetched(
            "octo/widgets",
            AlertStatus::Alerts(vec![alert.clone()]),
            AlertStatus::Clear,
        );

        assert_eq!(
            report.to_response(),
            json!({
                "repoFullName": "octo/widgets",
                "codeql": [alert],
                "dependabot": "✅ No Dependabot alerts",
            })
        );
    }

    #[test]
    fn test_failed_report_serializes_single_error_field() {
        let report = SecurityReport::failed("octo/widgets", "boom");

        assert_eq!(
            report.to_response(),
            json!({"repoFullName": "octo/widgets", "error": "boom"})
        );
    }
}
