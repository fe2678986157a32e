//! Installation registry.
//!
//! Tracks which repositories have the App installed and which repositories
//! each organization has registered. State is process-local; the store seam
//! exists so a persistent backend can be swapped in without touching the
//! handlers.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{AppError, AppResult};

/// Storage backend for the registry maps.
///
/// Implementations must be safe to share across worker threads; actix runs
/// handlers on a multi-threaded runtime.
pub trait RegistryStore: Send + Sync {
    /// Idempotent upsert of a repository's installation id
    fn upsert_installation(&self, repo: &str, installation_id: u64);

    fn installation_for(&self, repo: &str) -> Option<u64>;

    /// Unions `repos` into the organization's list, suppressing duplicates,
    /// under a single write lock so callers never observe a partial batch
    fn extend_org(&self, org: &str, repos: &[String]);

    fn repos_for_org(&self, org: &str) -> Option<Vec<String>>;

    /// Reverse lookup by linear scan over the organization lists
    fn org_for_repo(&self, repo: &str) -> Option<String>;
}

/// In-memory store; all registry state is lost on restart
#[derive(Default)]
pub struct InMemoryRegistry {
    installed: RwLock<HashMap<String, u64>>,
    org_repos: RwLock<HashMap<String, Vec<String>>>,
}

impl RegistryStore for InMemoryRegistry {
    fn upsert_installation(&self, repo: &str, installation_id: u64) {
        self.installed
            .write()
            .expect("registry lock poisoned")
            .insert(repo.to_string(), installation_id);
    }

    fn installation_for(&self, repo: &str) -> Option<u64> {
        self.installed
            .read()
            .expect("registry lock poisoned")
            .get(repo)
            .copied()
    }

    fn extend_org(&self, org: &str, repos: &[String]) {
        let mut map = self.org_repos.write().expect("registry lock poisoned");
        let list = map.entry(org.to_string()).or_default();
        for repo in repos {
            if !list.contains(repo) {
                list.push(repo.clone());
            }
        }
    }

    fn repos_for_org(&self, org: &str) -> Option<Vec<String>> {
        self.org_repos
            .read()
            .expect("registry lock poisoned")
            .get(org)
            .cloned()
    }

    fn org_for_repo(&self, repo: &str) -> Option<String> {
        let map = self.org_repos.read().expect("registry lock poisoned");
        map.iter()
            .find(|(_, repos)| repos.iter().any(|r| r == repo))
            .map(|(org, _)| org.clone())
    }
}

/// Registry operations over an injected store
#[derive(Clone)]
pub struct RegistryService {
    store: Arc<dyn RegistryStore>,
}

impl RegistryService {
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRegistry::default()))
    }

    /// Records an installation for `repo` and files it under `org`.
    /// Webhook-driven insertion lands here and does not re-check membership.
    pub fn add_repository(&self, repo: &str, org: &str, installation_id: u64) {
        self.store.upsert_installation(repo, installation_id);
        self.store.extend_org(org, std::slice::from_ref(&repo.to_string()));
    }

    pub fn is_installed(&self, repo: &str) -> bool {
        self.store.installation_for(repo).is_some()
    }

    pub fn installation_for(&self, repo: &str) -> Option<u64> {
        self.store.installation_for(repo)
    }

    /// Registers `repos` under `org`, rejecting the whole batch if any of
    /// them does not have the App installed. A rejected batch leaves the
    /// organization's list untouched.
    pub fn register_org_repos(&self, org: &str, repos: &[String]) -> AppResult<()> {
        for repo in repos {
            if !self.is_installed(repo) {
                return Err(AppError::Validation(format!(
                    "Repository {} does not have the app installed",
                    repo
                )));
            }
        }

        self.store.extend_org(org, repos);
        Ok(())
    }

    pub fn repos_for_org(&self, org: &str) -> Option<Vec<String>> {
        self.store.repos_for_org(org)
    }

    pub fn org_for_repo(&self, repo: &str) -> Option<String> {
        self.store.org_for_repo(repo)
    }
}
