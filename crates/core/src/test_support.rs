// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{ContainerStatus, HealthStatus};

/// Running container whose health check passes.
pub fn healthy(name: &str) -> ContainerStatus {
    checked(name, true, HealthStatus::Healthy)
}

/// Running container whose health check fails.
pub fn unhealthy(name: &str) -> ContainerStatus {
    checked(name, true, HealthStatus::Unhealthy)
}

/// Running container whose health check has not passed yet.
pub fn starting(name: &str) -> ContainerStatus {
    checked(name, true, HealthStatus::Starting)
}

/// Container with a health check.
pub fn checked(name: &str, running: bool, health: HealthStatus) -> ContainerStatus {
    ContainerStatus {
        name: name.to_string(),
        running,
        health: Some(health),
    }
}

/// Running container without a health check.
pub fn running(name: &str) -> ContainerStatus {
    ContainerStatus {
        name: name.to_string(),
        running: true,
        health: None,
    }
}

/// Stopped container without a health check.
pub fn stopped(name: &str) -> ContainerStatus {
    ContainerStatus {
        name: name.to_string(),
        running: false,
        health: None,
    }
}
