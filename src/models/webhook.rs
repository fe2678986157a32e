//! Inbound webhook payload shapes.
//!
//! Only the fields the router reads are modeled; the rest of the payload is
//! ignored during deserialization.

use serde::Deserialize;

/// Payload of an `installation` event
#[derive(Debug, Deserialize)]
pub struct InstallationEvent {
    pub installation: Installation,
    #[serde(default)]
    pub repositories: Vec<RepositorySummary>,
}

#[derive(Debug, Deserialize)]
pub struct Installation {
    pub id: u64,
    pub account: Account,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub login: String,
}

/// Abbreviated repository entry as listed in installation payloads
#[derive(Debug, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
}

/// Payload shape shared by the repository-scoped trigger events
/// (`push`, `pull_request`, `dependabot_alert`, `code_scanning_alert`)
#[derive(Debug, Deserialize)]
pub struct RepositoryEvent {
    pub repository: Repository,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installation_event_deserializes() {
        let payload = serde_json::json!({
            "action": "created",
            "installation": {
                "id": 4242,
                "account": {"login": "octo", "type": "Organization"},
                "app_id": 99
            },
            "repositories": [
                {"id": 1, "full_name": "octo/widgets", "private": false},
                {"id": 2, "full_name": "octo/gadgets", "private": true}
            ]
        });

        let event: InstallationEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.installation.id, 4242);
        assert_eq!(event.installation.account.login, "octo");
        assert_eq!(event.repositories.len(), 2);
        assert_eq!(event.repositories[0].full_name, "octo/widgets");
    }

    #[test]
    fn test_installation_event_without_repositories_list() {
        let payload = serde_json::json!({
            "installation": {"id": 7, "account": {"login": "octo"}}
        });

        let event: InstallationEvent = serde_json::from_value(payload).unwrap();
        assert!(event.repositories.is_empty());
    }

    #[test]
    fn test_repository_event_deserializes() {
        let payload = serde_json::json!({
            "ref": "refs/heads/main",
            "repository": {
                "id": 1,
                "full_name": "octo/widgets",
                "owner": {"login": "octo"}
            },
            "installation": {"id": 4242}
        });

        let event: RepositoryEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.repository.full_name, "octo/widgets");
    }
}
