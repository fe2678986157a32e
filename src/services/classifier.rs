//! Verdict classification.
//!
//! A pure function from fetched reports to safe/unsafe verdicts. A
//! repository is safe exactly when both scanners came back clear; a fetch
//! failure counts as unsafe because nothing could be verified.

use crate::models::{ReportOutcome, SecurityReport, Verdict};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ClassifyError {
    #[error("Cannot classify an empty report list")]
    NoReports,
}

/// Derives one verdict per report. Rejecting an empty input is the only
/// validation this function performs.
pub fn classify(reports: &[SecurityReport]) -> Result<Vec<Verdict>, ClassifyError> {
    if reports.is_empty() {
        return Err(ClassifyError::NoReports);
    }

    Ok(reports.iter().map(verdict_for).collect())
}

fn verdict_for(report: &SecurityReport) -> Verdict {
    let (safe_to_use, message) = match &report.outcome {
        ReportOutcome::Fetched { codeql, dependabot } if codeql.is_clear() && dependabot.is_clear() => (
            true,
            format!("✅ {} has no outstanding security alerts", report.repo_full_name),
        ),
        ReportOutcome::Fetched { .. } => (
            false,
            format!("❌ {} has outstanding security alerts", report.repo_full_name),
        ),
        ReportOutcome::Failed { error } => (
            false,
            format!("❌ Could not verify {}: {}", report.repo_full_name, error),
        ),
    };

    Verdict {
        repo_full_name: report.repo_full_name.clone(),
        safe_to_use,
        message,
    }
}
