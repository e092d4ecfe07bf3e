//! Periodic sweep that flips past-due `sent` invoices to `overdue`.
//!
//! Spawns a background task that marks invoices whose due date has passed.
//! Runs on a fixed interval using `tokio::time::interval`, so the status is
//! eventually consistent within one sweep period, not the instant midnight
//! passes.

use std::time::Duration;

use chrono::Utc;
use clientpulse_db::repositories::InvoiceRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the overdue-invoice sweep loop.
///
/// Marks `sent` invoices with `due_date` before today as `overdue`.
/// Runs until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Overdue invoice sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Overdue invoice sweep stopping");
                break;
            }
            _ = interval.tick() => {
                let today = Utc::now().date_naive();
                match InvoiceRepo::mark_overdue(&pool, today).await {
                    Ok(marked) => {
                        if marked > 0 {
                            tracing::info!(marked, "Overdue sweep: invoices marked overdue");
                        } else {
                            tracing::debug!("Overdue sweep: nothing past due");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Overdue sweep failed");
                    }
                }
            }
        }
    }
}
