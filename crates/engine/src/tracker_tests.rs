// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use et_adapters::{FakeRuntime, RuntimeError};
use et_core::test_support::{healthy, running, starting, stopped, unhealthy};
use et_core::{ContainerStatus, RecoveryState};

const LABEL: &str = "tested=true";

fn kill(id: &str) -> TrackedKill {
    TrackedKill {
        container: ContainerId::new(id),
        method: KillMethod::Sigkill,
        session: 1,
    }
}

/// `n` copies of a status, one per poll.
fn polls(n: usize, status: ContainerStatus) -> Vec<ContainerStatus> {
    vec![status; n]
}

#[tokio::test(start_paused = true)]
async fn measures_degraded_to_healthy_interval() {
    // Polls every 500ms: down at t=2s, back at t=5s
    let runtime = FakeRuntime::new();
    runtime.add_container("a", LABEL, healthy("web"));
    runtime.script(
        "a",
        [
            polls(3, healthy("web")),
            polls(6, unhealthy("web")),
            polls(1, healthy("web")),
        ]
        .concat(),
    );

    let record = track_recovery(&runtime, &kill("a"), &TrackerConfig::default()).await;

    assert_eq!(record.state, RecoveryState::Recovered);
    assert_eq!(record.time_to_recover, Duration::from_secs(3));
    assert_eq!(record.container, ContainerInfo::new("a", "web"));
    assert_eq!(record.kill_method, KillMethod::Sigkill);
    assert_eq!(runtime.inspect_count("a"), 10);
}

#[tokio::test(start_paused = true)]
async fn container_without_health_check_tracks_running_state() {
    let runtime = FakeRuntime::new();
    runtime.add_container("a", LABEL, running("worker"));
    runtime.script(
        "a",
        [polls(2, stopped("worker")), polls(1, running("worker"))].concat(),
    );

    let record = track_recovery(&runtime, &kill("a"), &TrackerConfig::default()).await;

    assert_eq!(record.state, RecoveryState::Recovered);
    assert_eq!(record.time_to_recover, Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn starting_health_counts_as_down_until_healthy() {
    let runtime = FakeRuntime::new();
    runtime.add_container("a", LABEL, healthy("web"));
    runtime.script(
        "a",
        [
            polls(1, stopped("web")),
            polls(3, starting("web")),
            polls(1, healthy("web")),
        ]
        .concat(),
    );

    // stopped() has no health check, so it reads as degraded
    let record = track_recovery(&runtime, &kill("a"), &TrackerConfig::default()).await;

    assert_eq!(record.state, RecoveryState::Recovered);
    assert_eq!(record.time_to_recover, Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn never_degrading_fails_after_degrade_timeout() {
    let runtime = FakeRuntime::new();
    runtime.add_container("a", LABEL, healthy("web"));

    let start = Instant::now();
    let record = track_recovery(&runtime, &kill("a"), &TrackerConfig::default()).await;

    assert_eq!(record.state, RecoveryState::Failed);
    assert_eq!(record.time_to_recover, Duration::ZERO);
    assert_eq!(record.container.name, "web");
    assert_eq!(start.elapsed(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn never_recovering_fails_after_recover_timeout() {
    // Down at t=1s, stays down
    let runtime = FakeRuntime::new();
    runtime.add_container("a", LABEL, unhealthy("web"));
    runtime.script("a", [healthy("web"), unhealthy("web")]);

    let start = Instant::now();
    let record = track_recovery(&runtime, &kill("a"), &TrackerConfig::default()).await;

    assert_eq!(record.state, RecoveryState::Failed);
    assert_eq!(record.time_to_recover, Duration::ZERO);
    assert_eq!(start.elapsed(), Duration::from_secs(31));
}

#[tokio::test(start_paused = true)]
async fn recovery_just_before_timeout_counts() {
    let runtime = FakeRuntime::new();
    runtime.add_container("a", LABEL, healthy("web"));
    // Down at 0.5s, up 29.5s later (59 more polls)
    runtime.script(
        "a",
        [polls(59, unhealthy("web")), polls(1, healthy("web"))].concat(),
    );

    let record = track_recovery(&runtime, &kill("a"), &TrackerConfig::default()).await;

    assert_eq!(record.state, RecoveryState::Recovered);
    assert_eq!(record.time_to_recover, Duration::from_millis(29_500));
}

#[tokio::test(start_paused = true)]
async fn vanished_container_fails_immediately() {
    let runtime = FakeRuntime::new();
    runtime.add_container("a", LABEL, healthy("web"));
    runtime.remove_container("a");

    let start = Instant::now();
    let record = track_recovery(&runtime, &kill("a"), &TrackerConfig::default()).await;

    assert_eq!(record.state, RecoveryState::Failed);
    assert_eq!(record.container.name, "unknown");
    assert_eq!(start.elapsed(), Duration::from_millis(500));
    assert_eq!(runtime.inspect_count("a"), 1);
}

#[tokio::test(start_paused = true)]
async fn inspect_error_while_down_fails_and_keeps_name() {
    let runtime = FakeRuntime::new();
    runtime.add_container("a", LABEL, healthy("web"));
    runtime.script("a", [unhealthy("web")]);

    let tracker = {
        let runtime = runtime.clone();
        tokio::spawn(async move {
            track_recovery(&runtime, &kill("a"), &TrackerConfig::default()).await
        })
    };

    tokio::time::sleep(Duration::from_millis(750)).await;
    runtime.fail_inspect("a", RuntimeError::Unavailable("daemon gone".into()));

    let record = tracker.await.unwrap();
    assert_eq!(record.state, RecoveryState::Failed);
    assert_eq!(record.container.name, "web");
}

#[yare::parameterized(
    fast_polls = { 100, 5_000, 5_000 },
    slow_polls = { 2_000, 10_000, 4_000 },
)]
fn custom_config_bounds_lifetime(poll_ms: u64, degrade_ms: u64, recover_ms: u64) {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap()
        .block_on(async {
            let runtime = FakeRuntime::new();
            runtime.add_container("a", LABEL, healthy("web"));
            let config = TrackerConfig {
                poll_interval: Duration::from_millis(poll_ms),
                degrade_timeout: Duration::from_millis(degrade_ms),
                recover_timeout: Duration::from_millis(recover_ms),
            };

            let start = Instant::now();
            let record = track_recovery(&runtime, &kill("a"), &config).await;

            assert_eq!(record.state, RecoveryState::Failed);
            assert_eq!(start.elapsed(), Duration::from_millis(degrade_ms));
        });
}

#[tokio::test(start_paused = true)]
async fn spawned_tracker_reports_into_ledger() {
    let runtime = FakeRuntime::new();
    runtime.add_container("a", LABEL, healthy("web"));
    runtime.script("a", [stopped("web"), healthy("web")]);
    let ledger = Arc::new(RecoveryLedger::new(4));

    let handle = spawn_tracker(
        runtime.clone(),
        &ledger,
        TrackedKill {
            session: 4,
            ..kill("a")
        },
        TrackerConfig::default(),
    );
    assert_eq!(ledger.pending(), 1);

    ledger.wait_idle().await;
    handle.await.unwrap();

    let records = ledger.snapshot();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].state, RecoveryState::Recovered);
    assert_eq!(records[0].time_to_recover, Duration::from_millis(500));
    assert_eq!(records[0].session, 4);
}
