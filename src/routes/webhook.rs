use actix_web::{web, HttpRequest, HttpResponse};
use tokio::sync::mpsc;

use crate::audit::AuditJob;
use crate::error::MessageResponse;
use crate::models::{InstallationEvent, RepositoryEvent};
use crate::services::RegistryService;

/// Events that trigger a full audit of the event's repository
const TRIGGER_EVENTS: [&str; 4] = [
    "push",
    "pull_request",
    "dependabot_alert",
    "code_scanning_alert",
];

/// POST /webhook - Inbound platform events.
/// Always acknowledges with 200 immediately; audit work happens on the
/// worker queue and malformed payloads are logged and dropped.
pub async fn receive(
    registry: web::Data<RegistryService>,
    queue: web::Data<mpsc::Sender<AuditJob>>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let event = req
        .headers()
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if event == "installation" {
        handle_installation(&registry, &body);
    } else if TRIGGER_EVENTS.contains(&event) {
        handle_trigger(event, &queue, &body);
    } else {
        log::debug!("Ignoring {} event", if event.is_empty() { "untyped" } else { event });
    }

    HttpResponse::Ok().json(MessageResponse::new("Webhook received"))
}

/// Replays every repository listed in the installation into the registry
fn handle_installation(registry: &RegistryService, body: &[u8]) {
    let event: InstallationEvent = match serde_json::from_slice(body) {
        Ok(event) => event,
        Err(e) => {
            log::warn!("Ignoring malformed installation payload: {}", e);
            return;
        }
    };

    let org = &event.installation.account.login;
    for repo in &event.repositories {
        registry.add_repository(&repo.full_name, org, event.installation.id);
    }

    log::info!(
        "Registered {} repositories for installation {} ({})",
        event.repositories.len(),
        event.installation.id,
        org
    );
}

/// Queues an audit for the event's repository
fn handle_trigger(event: &str, queue: &mpsc::Sender<AuditJob>, body: &[u8]) {
    let payload: RepositoryEvent = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Ignoring malformed {} payload: {}", event, e);
            return;
        }
    };

    let job = AuditJob {
        repo_full_name: payload.repository.full_name,
    };

    if let Err(e) = queue.try_send(job) {
        log::error!("Audit queue rejected {} event: {}", event, e);
    }
}

/// Configure the webhook route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook", web::post().to(receive));
}
