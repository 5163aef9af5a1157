//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The only recurring task is the session liveness sweep: every sweep tick
//! re-validates each persisted session through the lifecycle controller,
//! which purges expired sessions and surfaces dead provider connections.
//! Fire-and-forget maintenance; nothing is returned to a caller.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::auth::AuthService;

/// Start all scheduled tasks
pub async fn start_scheduler(
    auth: Arc<AuthService>,
    sweep_interval_minutes: u64,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let interval = Duration::from_secs(sweep_interval_minutes * 60);
    let sweep_job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let auth = auth.clone();
        Box::pin(async move {
            match auth.sweep().await {
                Ok(report) => {
                    tracing::info!(
                        "Session sweep complete: {} checked, {} expired, {} failed",
                        report.checked,
                        report.expired,
                        report.failed
                    );
                }
                Err(e) => {
                    tracing::error!("Session sweep failed: {}", e);
                }
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Scheduled tasks started (session sweep every {} minutes)",
        sweep_interval_minutes
    );
    Ok(scheduler)
}
