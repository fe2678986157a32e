use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, AppResult, MessageResponse};
use crate::models::RegisterOrgRepos;
use crate::services::RegistryService;

#[derive(Debug, Deserialize)]
pub struct CheckIfAddedQuery {
    #[serde(rename = "repoUrl")]
    pub repo_url: Option<String>,
}

/// GET /checkIfAdded?repoUrl=owner/name - Is the App installed on this repository?
pub async fn check_if_added(
    registry: web::Data<RegistryService>,
    query: web::Query<CheckIfAddedQuery>,
) -> AppResult<HttpResponse> {
    let repo = query
        .repo_url
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::Validation("Missing repoUrl query parameter".to_string()))?;

    if registry.is_installed(repo) {
        Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
            "{} has the app installed",
            repo
        ))))
    } else {
        Err(AppError::NotFound(format!(
            "{} does not have the app installed",
            repo
        )))
    }
}

/// POST /addOrgWithRepos - Register an organization's repositories.
/// The whole batch is rejected if any repository is not installed.
pub async fn add_org_with_repos(
    registry: web::Data<RegistryService>,
    body: web::Json<RegisterOrgRepos>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();

    let org = input
        .org
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .ok_or_else(|| AppError::Validation("Missing org in request body".to_string()))?;

    if input.repos.is_empty() {
        return Err(AppError::Validation(
            "repos must be a non-empty list".to_string(),
        ));
    }

    registry.register_org_repos(org, &input.repos)?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Registered {} repositories for {}",
        input.repos.len(),
        org
    ))))
}

/// Configure registry routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/checkIfAdded", web::get().to(check_if_added))
        .route("/addOrgWithRepos", web::post().to(add_org_with_repos));
}
