//! Periodic synchronization.

use crate::error::Result;
use crate::synchronizer::{PassOutcome, Synchronizer};
use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

/// Start a pass every `period` (the first immediately) until `shutdown`
/// resolves.
///
/// Ticks never wait for the previous pass: each one spawns a pass and relies
/// on the synchronizer's guard to turn overlaps into no-ops. Ticks missed
/// while the runtime was busy are skipped rather than replayed. Passes still
/// running at shutdown are aborted; they never recorded a marker, so the
/// next run starts over.
pub async fn run<F>(synchronizer: Arc<Synchronizer>, period: Duration, shutdown: F)
where
    F: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut passes = JoinSet::new();
    let mut shutdown = pin!(shutdown);

    tracing::info!(?period, "Scheduler started");
    loop {
        tokio::select! {
            () = &mut shutdown => break,
            _ = interval.tick() => {
                while passes.try_join_next().is_some() {}
                let synchronizer = Arc::clone(&synchronizer);
                passes.spawn(async move { report(synchronizer.synchronize_once().await) });
            }
        }
    }

    tracing::info!(in_flight = passes.len(), "Scheduler stopping");
    passes.shutdown().await;
}

fn report(outcome: Result<PassOutcome>) {
    match outcome {
        Ok(PassOutcome::AlreadyRunning) => tracing::debug!("Previous pass still running; tick dropped"),
        Ok(PassOutcome::Unchanged(_) | PassOutcome::Completed(_)) => {}
        Err(err) => tracing::error!(error = ?err, "Synchronization pass failed"),
    }
}
