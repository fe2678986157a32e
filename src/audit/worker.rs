use std::sync::Arc;

use tokio::sync::mpsc;

use crate::services::classifier::{classify, ClassifyError};
use crate::services::credentials::CredentialMinter;
use crate::services::registry::RegistryService;
use crate::services::reports::{repo_report, ReportFetcher};
use crate::services::seal::{SealError, SealNotifier};

/// Bound on queued audits; beyond this, new jobs are dropped with a log line
pub const QUEUE_DEPTH: usize = 64;

/// One audit request, queued per trigger event
#[derive(Debug, Clone, PartialEq)]
pub struct AuditJob {
    pub repo_full_name: String,
}

/// Everything the worker needs to run an audit end to end
pub struct AuditContext {
    pub registry: RegistryService,
    pub minter: Arc<CredentialMinter>,
    pub fetcher: ReportFetcher,
    pub seal: SealNotifier,
}

#[derive(Debug, thiserror::Error)]
enum AuditError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Seal(#[from] SealError),
}

/// Spawns the audit worker and returns the queue handle.
/// The worker runs until every sender is dropped.
pub fn spawn_worker(ctx: AuditContext) -> mpsc::Sender<AuditJob> {
    let (tx, mut rx) = mpsc::channel::<AuditJob>(QUEUE_DEPTH);

    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            if let Err(e) = run_audit(&ctx, &job).await {
                log::error!("Audit of {} failed: {}", job.repo_full_name, e);
            }
        }
        log::info!("Audit queue closed, worker exiting");
    });

    tx
}

async fn run_audit(ctx: &AuditContext, job: &AuditJob) -> Result<(), AuditError> {
    let report = repo_report(&ctx.registry, &ctx.minter, &ctx.fetcher, &job.repo_full_name).await;
    let verdicts = classify(std::slice::from_ref(&report))?;
    let verdict = &verdicts[0];

    let org = ctx
        .registry
        .org_for_repo(&job.repo_full_name)
        .unwrap_or_else(|| "unregistered".to_string());
    log::info!(
        "Audited {} (org {}): safe_to_use={}",
        job.repo_full_name,
        org,
        verdict.safe_to_use
    );

    ctx.seal.publish(verdict.safe_to_use).await?;
    Ok(())
}
