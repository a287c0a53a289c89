//! Background maintenance

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::state::AppState;

/// Periodically drop expired OTP records and stale limiter buckets
pub fn spawn_purge_task(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            run_purge(&state).await;
        }
    })
}

/// One purge pass; failures are logged and retried on the next tick
pub async fn run_purge(state: &AppState) {
    // Errors are already logged by the service
    let records = state.otp_service.purge_expired().await.unwrap_or(0);
    let buckets = state
        .rate_limiter
        .as_ref()
        .map(|limiter| limiter.purge_expired())
        .unwrap_or(0);

    if records > 0 || buckets > 0 {
        tracing::debug!(
            records = records,
            buckets = buckets,
            event = "purge_completed",
            "Purged expired state"
        );
    }
}
