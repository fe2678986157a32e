//! Seal verdict delivery.
//!
//! Posts the final pass/fail verdict to the certificate service as a JSON
//! body carrying only the boolean.

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum SealError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Seal endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct SealPayload {
    #[serde(rename = "showSeal")]
    show_seal: bool,
}

/// Notifies the certificate service of a repository's verdict
#[derive(Clone)]
pub struct SealNotifier {
    endpoint_url: String,
    client: reqwest::Client,
}

impl SealNotifier {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("sealgate")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint_url: endpoint_url.into(),
            client,
        }
    }

    /// Sends `{"showSeal": <bool>}` to the configured endpoint
    pub async fn publish(&self, show_seal: bool) -> Result<(), SealError> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .json(&SealPayload { show_seal })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SealError::Status { status, body });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_payload_uses_camel_case_key() {
        let body = serde_json::to_value(SealPayload { show_seal: true }).unwrap();
        assert_eq!(body, serde_json::json!({"showSeal": true}));
    }
}
