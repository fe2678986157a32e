use serde::Deserialize;

/// Request body for POST /addOrgWithRepos
///
/// `org` is optional so that a missing field surfaces as a 400 with a
/// readable message instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct RegisterOrgRepos {
    pub org: Option<String>,
    #[serde(default)]
    pub repos: Vec<String>,
}
