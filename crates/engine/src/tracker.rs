// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recovery tracker: follows one killed container until it is healthy again.
//!
//! The tracker polls the container in two phases. First it waits for the
//! kill to show (the container degrades), which anchors the measurement.
//! Then it waits for the container to come back and reports the time
//! between the two observations. Each phase has its own timeout, and any
//! failed observation ends tracking with a failed record.

use crate::ledger::RecoveryLedger;
use et_adapters::ContainerRuntime;
use et_core::{format_duration, ContainerId, ContainerInfo, KillMethod, RecoveryRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::Instrument;

/// Name reported when the container could never be inspected.
const UNKNOWN_NAME: &str = "unknown";

/// Polling cadence and phase timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    pub poll_interval: Duration,
    /// Maximum time from the kill until degradation is observed.
    pub degrade_timeout: Duration,
    /// Maximum time from degradation until recovery is observed.
    pub recover_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            degrade_timeout: Duration::from_secs(30),
            recover_timeout: Duration::from_secs(30),
        }
    }
}

/// A delivered kill to follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedKill {
    pub container: ContainerId,
    pub method: KillMethod,
    pub session: u64,
}

#[derive(Clone, Copy)]
enum Phase {
    AwaitingDegradation,
    AwaitingRecovery { degraded_at: Instant },
}

/// Follow a killed container to its terminal state.
///
/// Starts the clock when called, so call it right after the kill was delivered.
pub async fn track_recovery<R: ContainerRuntime>(
    runtime: &R,
    kill: &TrackedKill,
    config: &TrackerConfig,
) -> RecoveryRecord {
    let killed_at = Instant::now();
    let mut phase = Phase::AwaitingDegradation;
    let mut name: Option<String> = None;

    let failed = |name: &Option<String>| {
        RecoveryRecord::failed(
            container_info(&kill.container, name),
            kill.method,
            kill.session,
        )
    };

    loop {
        tokio::time::sleep(config.poll_interval).await;

        let status = match runtime.inspect(&kill.container).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "lost track of container");
                return failed(&name);
            }
        };
        name = Some(status.name.clone());
        let now = Instant::now();

        match phase {
            Phase::AwaitingDegradation => {
                if status.is_degraded() {
                    tracing::debug!(
                        after_ms = now.duration_since(killed_at).as_millis() as u64,
                        %status,
                        "container went down"
                    );
                    phase = Phase::AwaitingRecovery { degraded_at: now };
                } else if now.duration_since(killed_at) >= config.degrade_timeout {
                    tracing::warn!(%status, "kill had no visible effect in time");
                    return failed(&name);
                }
            }
            Phase::AwaitingRecovery { degraded_at } => {
                let down_for = now.duration_since(degraded_at);
                if status.is_recovered() {
                    tracing::info!(ttr = %format_duration(down_for), "container recovered");
                    return RecoveryRecord::recovered(
                        container_info(&kill.container, &name),
                        kill.method,
                        down_for,
                        kill.session,
                    );
                }
                if down_for >= config.recover_timeout {
                    tracing::warn!(%status, "container did not recover in time");
                    return failed(&name);
                }
            }
        }
    }
}

fn container_info(id: &ContainerId, name: &Option<String>) -> ContainerInfo {
    ContainerInfo::new(id.clone(), name.as_deref().unwrap_or(UNKNOWN_NAME))
}

/// Spawn a tracker task that reports into `ledger`.
///
/// The ledger slot is taken before spawning, so a quiescence wait that starts
/// after this call returns always includes the new tracker.
pub fn spawn_tracker<R: ContainerRuntime>(
    runtime: R,
    ledger: &Arc<RecoveryLedger>,
    kill: TrackedKill,
    config: TrackerConfig,
) -> JoinHandle<()> {
    let ticket = ledger.begin();
    let span = tracing::info_span!(
        "tracker",
        id = kill.container.short(12),
        method = %kill.method,
        session = kill.session,
    );
    tokio::spawn(
        async move {
            let record = track_recovery(&runtime, &kill, &config).await;
            ticket.complete(record);
        }
        .instrument(span),
    )
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
