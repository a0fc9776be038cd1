// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::runtime::{ContainerRuntime, RuntimeError};
use async_trait::async_trait;
use et_core::{ContainerId, ContainerInfo, ContainerStatus, KillMethod};
use tracing::Instrument;

/// Wrapper that adds tracing to any ContainerRuntime
#[derive(Clone)]
pub struct TracedRuntime<R> {
    inner: R,
}

impl<R> TracedRuntime<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: ContainerRuntime> ContainerRuntime for TracedRuntime<R> {
    async fn list_healthy(&self, label: &str) -> Result<Vec<ContainerInfo>, RuntimeError> {
        let start = std::time::Instant::now();
        let result = self.inner.list_healthy(label).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(found) => tracing::debug!(label, count = found.len(), elapsed_ms, "listed"),
            Err(e) => tracing::error!(label, elapsed_ms, error = %e, "list failed"),
        }
        result
    }

    async fn kill(&self, id: &ContainerId, method: KillMethod) -> Result<(), RuntimeError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.kill(id, method).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "signal delivered"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "kill failed"),
            }
            result
        }
        .instrument(tracing::info_span!("runtime.kill", id = id.short(12), %method))
        .await
    }

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerStatus, RuntimeError> {
        let result = self.inner.inspect(id).await;
        match &result {
            Ok(status) => tracing::trace!(id = id.short(12), %status, "inspected"),
            Err(e) => tracing::warn!(id = id.short(12), error = %e, "inspect failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
