//! Fixed-interval background sync.
//!
//! Every tick runs one full pass through the same [`crate::sync::SyncEngine`]
//! the HTTP trigger surface uses; the structured report is reduced to log
//! lines here instead of being returned to a caller. There is no mutual
//! exclusion between a scheduled pass and an on-demand trigger; overlapping
//! passes interleave idempotent upserts.

use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::state::AppState;
use crate::sync::{SyncReport, SyncStatus};

/// Spawn the background task running a sync pass on a fixed interval.
///
/// The first pass runs one full period after startup, matching a cron-style
/// schedule rather than firing immediately.
pub fn spawn_sync_scheduler(state: AppState) {
    let period = state.config().sync_interval;
    info!(
        period_secs = period.as_secs(),
        "Spawning background sync scheduler"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() fires immediately; consume the first tick so the first
        // pass waits out one period.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            info!("Scheduled data sync started");

            match state.sync().run_pass().await {
                Ok(SyncReport::NoTenants) => {
                    info!("No tenants registered, nothing to sync");
                }
                Ok(SyncReport::Completed(outcomes)) => {
                    let synced: usize = outcomes.iter().filter_map(|o| o.count).sum();
                    let failures: Vec<_> = outcomes
                        .iter()
                        .filter(|o| o.status == SyncStatus::Failed)
                        .collect();

                    if failures.is_empty() {
                        info!(records = synced, "Scheduled sync complete for all tenants");
                    } else {
                        for outcome in &failures {
                            warn!(
                                shop = %outcome.shop,
                                entity = %outcome.entity,
                                error = outcome.error.as_deref().unwrap_or("unknown"),
                                "Tenant sync failed"
                            );
                        }
                        warn!(
                            records = synced,
                            failed = failures.len(),
                            "Scheduled sync finished with failures"
                        );
                    }
                }
                Err(e) => {
                    error!(error = %e, "Scheduled sync aborted");
                }
            }
        }
    });
}
