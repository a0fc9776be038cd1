// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container runtime adapters

mod docker;

pub use docker::DockerCliRuntime;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRuntime, RuntimeCall};

use async_trait::async_trait;
use et_core::{ContainerId, ContainerInfo, ContainerStatus, KillMethod};
use thiserror::Error;

/// Errors from container runtime operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("container runtime unavailable: {0}")]
    Unavailable(String),
    #[error("container not found: {0}")]
    NotFound(String),
    #[error("runtime command failed: {0}")]
    CommandFailed(String),
    #[error("unexpected runtime output: {0}")]
    Parse(String),
}

/// Adapter for the container engine (docker, etc.)
#[async_trait]
pub trait ContainerRuntime: Clone + Send + Sync + 'static {
    /// List containers carrying `label` that are currently healthy.
    ///
    /// Containers without a health check count as healthy while running.
    /// No ordering is guaranteed.
    async fn list_healthy(&self, label: &str) -> Result<Vec<ContainerInfo>, RuntimeError>;

    /// Deliver `method` to every process in the container.
    ///
    /// Only confirms delivery; the resulting health transition is observed
    /// separately through [`inspect`](Self::inspect).
    async fn kill(&self, id: &ContainerId, method: KillMethod) -> Result<(), RuntimeError>;

    /// Observe the container's current running and health state.
    async fn inspect(&self, id: &ContainerId) -> Result<ContainerStatus, RuntimeError>;
}
