use actix_web::{web, HttpResponse};
use futures_util::future::join_all;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::{repo_report, CredentialMinter, RegistryService, ReportFetcher};

#[derive(Debug, Deserialize)]
pub struct SafeToUseQuery {
    pub org: Option<String>,
}

/// GET /checkIfSafeToUse?org=name - Fetch the current security reports for
/// every repository the organization has registered. Reads only; registry
/// state is never touched here.
pub async fn check_if_safe_to_use(
    registry: web::Data<RegistryService>,
    minter: web::Data<CredentialMinter>,
    fetcher: web::Data<ReportFetcher>,
    query: web::Query<SafeToUseQuery>,
) -> AppResult<HttpResponse> {
    let org = query
        .org
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .ok_or_else(|| AppError::Validation("Missing org query parameter".to_string()))?;

    let repos = registry
        .repos_for_org(org)
        .ok_or_else(|| AppError::NotFound(format!("Organization {} is not registered", org)))?;

    // One report per repository, fetched concurrently; a failing repository
    // degrades to its error field instead of failing the batch
    let reports = join_all(
        repos
            .iter()
            .map(|full_name| repo_report(registry.get_ref(), minter.get_ref(), fetcher.get_ref(), full_name)),
    )
    .await;

    let body: Vec<_> = reports.iter().map(|r| r.to_response()).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/checkIfSafeToUse", web::get().to(check_if_safe_to_use));
}
