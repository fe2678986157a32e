//! Security report fetching.
//!
//! Pass-through reads of the platform's code-scanning and Dependabot alert
//! lists for one repository. Alert entries are kept as opaque JSON; only
//! emptiness matters downstream. Any failure collapses the whole report into
//! a single error field with no sub-cause distinction.

use serde_json::Value;

use crate::models::{AlertStatus, SecurityReport};
use crate::services::credentials::{CredentialMinter, GithubApiError};
use crate::services::registry::RegistryService;

/// Fetches alert lists for a repository with an installation token
#[derive(Clone)]
pub struct ReportFetcher {
    api_base: String,
    client: reqwest::Client,
}

impl ReportFetcher {
    pub fn new(api_base: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("sealgate")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_base: api_base.into(),
            client,
        }
    }

    /// Fetches both scanners for one repository
    pub async fn fetch_report(&self, token: &str, owner: &str, repo: &str) -> SecurityReport {
        let full_name = format!("{}/{}", owner, repo);

        let codeql = match self.list_alerts(token, owner, repo, "code-scanning").await {
            Ok(status) => status,
            Err(e) => return SecurityReport::failed(full_name, e.to_string()),
        };

        let dependabot = match self.list_alerts(token, owner, repo, "dependabot").await {
            Ok(status) => status,
            Err(e) => return SecurityReport::failed(full_name, e.to_string()),
        };

        SecurityReport::fetched(full_name, codeql, dependabot)
    }

    async fn list_alerts(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        scanner: &str,
    ) -> Result<AlertStatus, GithubApiError> {
        let url = format!("{}/repos/{}/{}/{}/alerts", self.api_base, owner, repo, scanner);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GithubApiError::Status { status, body });
        }

        let alerts: Vec<Value> = response.json().await?;
        Ok(AlertStatus::from_alerts(alerts))
    }
}

/// Resolves the installation for `full_name`, mints a token, and fetches the
/// repository's report. Every failure mode lands in the report's error field
/// so one broken repository never fails a whole batch.
pub async fn repo_report(
    registry: &RegistryService,
    minter: &CredentialMinter,
    fetcher: &ReportFetcher,
    full_name: &str,
) -> SecurityReport {
    let Some((owner, name)) = full_name.split_once('/') else {
        return SecurityReport::failed(full_name, "Malformed repository name");
    };

    let Some(installation_id) = registry.installation_for(full_name) else {
        return SecurityReport::failed(full_name, "App is not installed on this repository");
    };

    let token = match minter.installation_token(installation_id).await {
        Ok(token) => token.token,
        Err(e) => return SecurityReport::failed(full_name, e.to_string()),
    };

    fetcher.fetch_report(&token, owner, name).await
}
