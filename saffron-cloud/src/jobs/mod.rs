//! Background maintenance tasks

use sqlx::PgPool;

use crate::db;

/// Sweep cadence: once a day, first tick at startup so a restarted server
/// reconciles the ledger immediately.
const SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

/// Spawn the subscription expiry sweeper.
///
/// Each tick bulk-flips timed-out `active` rows to `expired`. The update is
/// idempotent and only tightens status, so it is safe to run concurrently
/// with reads and with purchase transactions. Errors are logged and the loop
/// keeps running.
pub fn spawn_expiry_sweeper(pool: PgPool) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let now = shared::util::now_millis();
            match db::subscriptions::sweep_expired(&pool, now).await {
                Ok(0) => tracing::debug!("Subscription expiry sweep: nothing to do"),
                Ok(n) => tracing::info!(expired = n, "Subscription expiry sweep"),
                Err(e) => tracing::error!(error = %e, "Subscription expiry sweep failed"),
            }
        }
    });
}
