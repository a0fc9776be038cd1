// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn web() -> ContainerInfo {
    ContainerInfo::new("abc123", "web-1")
}

#[test]
fn recovered_record_keeps_duration() {
    let record = RecoveryRecord::recovered(web(), KillMethod::Sigterm, Duration::from_secs(3), 2);
    assert!(record.is_recovered());
    assert_eq!(record.time_to_recover, Duration::from_secs(3));
    assert_eq!(record.session, 2);
}

#[test]
fn failed_record_has_zero_duration() {
    let record = RecoveryRecord::failed(web(), KillMethod::Sigkill, 1);
    assert!(!record.is_recovered());
    assert_eq!(record.state, RecoveryState::Failed);
    assert_eq!(record.time_to_recover, Duration::ZERO);
}

#[test]
fn serializes_ttr_as_nanoseconds() {
    let record =
        RecoveryRecord::recovered(web(), KillMethod::Sigkill, Duration::from_millis(1500), 1);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "container": {"id": "abc123", "name": "web-1"},
            "kill_method": "SIGKILL",
            "ttr": 1_500_000_000u64,
            "state": "RECOVERED",
            "session": 1,
        })
    );

    let back: RecoveryRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}
