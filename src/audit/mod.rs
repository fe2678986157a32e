//! Background audit pipeline.
//!
//! Webhook trigger events are acknowledged immediately; the actual
//! mint-fetch-classify-notify work is handed to a worker task through a
//! bounded queue so failures stay visible in the logs without ever reaching
//! the webhook caller.

mod worker;

pub use worker::{spawn_worker, AuditContext, AuditJob, QUEUE_DEPTH};
