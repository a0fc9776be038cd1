// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container identity and health classification.
//!
//! A container is "in play" while it is healthy. Containers with a health
//! check are judged by its status; containers without one are judged by
//! whether they are running.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Opaque identifier assigned to a container by the runtime.
    pub struct ContainerId;
}

/// Identity of a runtime container, as reported by a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub id: ContainerId,
    pub name: String,
}

impl ContainerInfo {
    pub fn new(id: impl Into<ContainerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Health check status reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Starting,
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    /// Parse the runtime's status string.
    ///
    /// Returns `None` for `"none"` and empty strings (no health check configured).
    /// Unknown statuses count as unhealthy.
    pub fn parse(status: &str) -> Option<Self> {
        match status.trim() {
            "" | "none" => None,
            "healthy" => Some(HealthStatus::Healthy),
            "starting" => Some(HealthStatus::Starting),
            _ => Some(HealthStatus::Unhealthy),
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Starting => write!(f, "starting"),
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// One observation of a container's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    pub name: String,
    pub running: bool,
    /// `None` when the container has no health check.
    pub health: Option<HealthStatus>,
}

impl ContainerStatus {
    /// Healthy and running, or running when no health check is configured.
    pub fn is_healthy(&self) -> bool {
        match self.health {
            Some(health) => health == HealthStatus::Healthy && self.running,
            None => self.running,
        }
    }

    /// The container has gone down after a kill.
    ///
    /// Note this is not the negation of [`is_healthy`](Self::is_healthy): a
    /// stopped container whose last health status is still `healthy` has not
    /// been observed as degraded yet.
    pub fn is_degraded(&self) -> bool {
        match self.health {
            Some(health) => health != HealthStatus::Healthy,
            None => !self.running,
        }
    }

    /// The container came back after degrading.
    pub fn is_recovered(&self) -> bool {
        self.is_healthy()
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.running { "running" } else { "stopped" };
        match self.health {
            Some(health) => write!(f, "{} ({})", state, health),
            None => write!(f, "{}", state),
        }
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
