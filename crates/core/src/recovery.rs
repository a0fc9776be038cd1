// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of a single kill operation.

use crate::container::ContainerInfo;
use crate::kill_method::KillMethod;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Terminal state of a recovery tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryState {
    Recovered,
    Failed,
}

impl fmt::Display for RecoveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryState::Recovered => write!(f, "RECOVERED"),
            RecoveryState::Failed => write!(f, "FAILED"),
        }
    }
}

/// Result of tracking one killed container.
///
/// `time_to_recover` is zero exactly when `state` is `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryRecord {
    pub container: ContainerInfo,
    pub kill_method: KillMethod,
    /// Degraded-to-healthy interval, serialized as integer nanoseconds.
    #[serde(rename = "ttr", with = "duration_nanos")]
    pub time_to_recover: Duration,
    pub state: RecoveryState,
    /// Game session the kill belonged to.
    pub session: u64,
}

impl RecoveryRecord {
    pub fn recovered(
        container: ContainerInfo,
        kill_method: KillMethod,
        time_to_recover: Duration,
        session: u64,
    ) -> Self {
        Self {
            container,
            kill_method,
            time_to_recover,
            state: RecoveryState::Recovered,
            session,
        }
    }

    pub fn failed(container: ContainerInfo, kill_method: KillMethod, session: u64) -> Self {
        Self {
            container,
            kill_method,
            time_to_recover: Duration::ZERO,
            state: RecoveryState::Failed,
            session,
        }
    }

    pub fn is_recovered(&self) -> bool {
        self.state == RecoveryState::Recovered
    }
}

mod duration_nanos {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_nanos)
    }
}

#[cfg(test)]
#[path = "recovery_tests.rs"]
mod tests;
