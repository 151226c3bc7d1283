//! Periodic refresh tasks.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{CycleOutcome, Dashboard};
use crate::clock::now_ms;

/// Which cycle a periodic task drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind {
    Local,
    Nearby,
}

impl std::fmt::Display for RefreshKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshKind::Local => write!(f, "LocalRefresh"),
            RefreshKind::Nearby => write!(f, "NearbyRefresh"),
        }
    }
}

/// Run one cycle kind every `period` until `cancel_token` fires.
///
/// The first tick is immediate. Ticks missed while a cycle runs are
/// dropped rather than replayed. Cancellation wins over a ready tick.
pub async fn run_periodic(
    dashboard: Arc<Dashboard>,
    kind: RefreshKind,
    period: Duration,
    cancel_token: CancellationToken,
) -> u64 {
    info!("[{}] Task starting with interval {:?}", kind, period);

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut completed = 0u64;

    loop {
        tokio::select! {
            biased;

            _ = cancel_token.cancelled() => {
                info!("[{}] Received shutdown signal after {} cycles", kind, completed);
                return completed;
            }
            _ = interval.tick() => {
                let now = now_ms();
                let outcome = match kind {
                    RefreshKind::Local => dashboard.run_local_cycle(now).await,
                    RefreshKind::Nearby => dashboard.run_nearby_cycle(now).await,
                };
                debug!(task = %kind, ?outcome, "Refresh tick");
                if outcome == CycleOutcome::Completed {
                    completed += 1;
                }
            }
        }
    }
}
