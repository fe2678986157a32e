//! Integration tests for /checkIfSafeToUse
//!
//! The handler is exercised against a stub platform API so the full
//! mint-then-fetch path runs over real sockets.

mod common;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use common::StubAlerts;
use sealgate::routes;
use sealgate::services::{RegistryService, ReportFetcher};

macro_rules! reports_app {
    ($registry:expr, $api_base:expr) => {{
        let base: String = $api_base;
        let minter = web::Data::new(common::minter(&base));
        let fetcher = web::Data::new(ReportFetcher::new(base));
        test::init_service(
            App::new()
                .app_data($registry.clone())
                .app_data(minter)
                .app_data(fetcher)
                .configure(routes::reports::configure),
        )
        .await
    }};
}

fn registered_registry() -> web::Data<RegistryService> {
    let registry = web::Data::new(RegistryService::in_memory());
    registry.add_repository("octo/widgets", "octo", 42);
    registry
        .register_org_repos("octo", &["octo/widgets".to_string()])
        .unwrap();
    registry
}

#[actix_web::test]
async fn test_clear_repo_reports_markers() {
    let github = common::github_stub(StubAlerts::clear());
    let registry = registered_registry();
    let app = reports_app!(registry, common::base_url(&github));

    let req = test::TestRequest::get()
        .uri("/checkIfSafeToUse?org=octo")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!([{
            "repoFullName": "octo/widgets",
            "codeql": "✅ No CodeQL alerts",
            "dependabot": "✅ No Dependabot alerts",
        }])
    );
}

#[actix_web::test]
async fn test_alerting_repo_reports_raw_alert_list() {
    let alerts = StubAlerts::with_codeql_alert();
    let github = common::github_stub(alerts.clone());
    let registry = registered_registry();
    let app = reports_app!(registry, common::base_url(&github));

    let req = test::TestRequest::get()
        .uri("/checkIfSafeToUse?org=octo")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["codeql"], alerts.codeql);
    assert_eq!(body[0]["dependabot"], "✅ No Dependabot alerts");
}

#[actix_web::test]
async fn test_upstream_failure_becomes_error_field() {
    let github = common::broken_github_stub();
    let registry = registered_registry();
    let app = reports_app!(registry, common::base_url(&github));

    let req = test::TestRequest::get()
        .uri("/checkIfSafeToUse?org=octo")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["repoFullName"], "octo/widgets");
    assert!(body[0]["error"].as_str().unwrap().contains("500"));
    assert!(body[0].get("codeql").is_none());
}

#[actix_web::test]
async fn test_unknown_org_returns_404_without_mutation() {
    let github = common::github_stub(StubAlerts::clear());
    let registry = web::Data::new(RegistryService::in_memory());
    let app = reports_app!(registry, common::base_url(&github));

    let req = test::TestRequest::get()
        .uri("/checkIfSafeToUse?org=ghost")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    assert_eq!(registry.repos_for_org("ghost"), None);
}

#[actix_web::test]
async fn test_missing_org_param_returns_400() {
    let github = common::github_stub(StubAlerts::clear());
    let registry = web::Data::new(RegistryService::in_memory());
    let app = reports_app!(registry, common::base_url(&github));

    let req = test::TestRequest::get().uri("/checkIfSafeToUse").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
