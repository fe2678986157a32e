//! Short-lived platform credentials.
//!
//! Every API call against an installation starts here: an RS256-signed App
//! assertion is exchanged for an installation-scoped access token. Tokens
//! are not cached; callers mint one per unit of work and failures propagate
//! untouched.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::GithubConfig;

/// Margin subtracted from `iat` to absorb clock skew against the platform
const CLOCK_SKEW_SECS: i64 = 60;
/// Assertion lifetime; the platform rejects anything above ten minutes
const ASSERTION_TTL_SECS: i64 = 600;

/// Errors from the platform API call path
#[derive(Debug, thiserror::Error)]
pub enum GithubApiError {
    #[error("Failed to sign app assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Claims of the App assertion
#[derive(Debug, Serialize)]
struct AppClaims {
    iat: i64,
    exp: i64,
    iss: String,
}

fn assertion_claims(app_id: u64, now: i64) -> AppClaims {
    AppClaims {
        iat: now - CLOCK_SKEW_SECS,
        exp: now + ASSERTION_TTL_SECS,
        iss: app_id.to_string(),
    }
}

/// Installation-scoped access token as returned by the token exchange
#[derive(Debug, Deserialize)]
pub struct InstallationToken {
    pub token: String,
    pub expires_at: String,
}

/// Mints installation tokens from the App's long-lived signing key
pub struct CredentialMinter {
    app_id: u64,
    api_base: String,
    encoding_key: EncodingKey,
    client: reqwest::Client,
}

impl CredentialMinter {
    /// Builds a minter from the PEM-encoded App private key.
    /// The key is parsed once here and reused for every assertion.
    pub fn from_pem(config: &GithubConfig, pem: &[u8]) -> Result<Self, GithubApiError> {
        let encoding_key = EncodingKey::from_rsa_pem(pem)?;

        let client = reqwest::Client::builder()
            .user_agent("sealgate")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            app_id: config.app_id,
            api_base: config.api_base.clone(),
            encoding_key,
            client,
        })
    }

    fn sign_assertion(&self) -> Result<String, GithubApiError> {
        let claims = assertion_claims(self.app_id, Utc::now().timestamp());
        Ok(encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Exchanges a fresh assertion for an installation access token
    pub async fn installation_token(
        &self,
        installation_id: u64,
    ) -> Result<InstallationToken, GithubApiError> {
        let assertion = self.sign_assertion()?;
        let url = format!(
            "{}/app/installations/{}/access_tokens",
            self.api_base, installation_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(assertion)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GithubApiError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}
