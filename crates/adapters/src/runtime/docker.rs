// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker runtime adapter driven through the `docker` CLI

use super::{ContainerRuntime, RuntimeError};
use crate::subprocess::run_with_timeout;
use async_trait::async_trait;
use et_core::{ContainerId, ContainerInfo, ContainerStatus, HealthStatus, KillMethod};
use serde::Deserialize;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Docker-backed runtime adapter
#[derive(Clone, Debug)]
pub struct DockerCliRuntime {
    bin: String,
    timeout: Duration,
}

impl Default for DockerCliRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCliRuntime {
    /// Binary and timeout from `ET_DOCKER_BIN` / `ET_DOCKER_TIMEOUT_MS`.
    pub fn new() -> Self {
        Self::with_binary(crate::env::docker_bin(), crate::env::docker_timeout())
    }

    pub fn with_binary(bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    async fn docker(&self, args: &[&str], description: &str) -> Result<Output, RuntimeError> {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args);
        run_with_timeout(cmd, self.timeout, description)
            .await
            .map_err(RuntimeError::Unavailable)
    }

    /// Inspect several containers in one call.
    ///
    /// Containers that vanished since they were listed are skipped: docker
    /// still prints the ones it found (possibly none) and exits non-zero with
    /// "No such object" for the rest.
    async fn inspect_many(&self, ids: &[&str]) -> Result<Vec<InspectEntry>, RuntimeError> {
        let mut args = vec!["inspect", "--type", "container", "--"];
        args.extend_from_slice(ids);
        let output = self.docker(&args, "docker inspect").await?;
        if output.status.success() {
            return parse_inspect(&output.stdout);
        }
        match classify_failure(&output.stderr) {
            RuntimeError::NotFound(_) => parse_inspect(&output.stdout),
            err => Err(err),
        }
    }
}

#[async_trait]
impl ContainerRuntime for DockerCliRuntime {
    async fn list_healthy(&self, label: &str) -> Result<Vec<ContainerInfo>, RuntimeError> {
        let filter = format!("label={}", label);
        let output = self
            .docker(
                &["ps", "--no-trunc", "--filter", &filter, "--format", "{{.ID}}"],
                "docker ps",
            )
            .await?;
        if !output.status.success() {
            return Err(classify_failure(&output.stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let ids: Vec<&str> = stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entries = self.inspect_many(&ids).await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.status().is_healthy())
            .map(|e| ContainerInfo::new(e.id.clone(), e.name()))
            .collect())
    }

    async fn kill(&self, id: &ContainerId, method: KillMethod) -> Result<(), RuntimeError> {
        // -1 broadcasts to every process in the container's PID namespace.
        // -d returns once the exec has started, without waiting on the target.
        // -- keeps an id that looks like a flag from being parsed as one.
        let output = self
            .docker(
                &["exec", "-d", "--", id.as_str(), "kill", "-s", method.as_str(), "-1"],
                "docker exec",
            )
            .await?;
        if !output.status.success() {
            return Err(classify_failure(&output.stderr));
        }
        Ok(())
    }

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerStatus, RuntimeError> {
        let mut entries = self.inspect_many(&[id.as_str()]).await?;
        match entries.pop() {
            Some(entry) => Ok(entry.status()),
            None => Err(RuntimeError::NotFound(id.to_string())),
        }
    }
}

/// Subset of `docker inspect` output the game needs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectEntry {
    id: String,
    #[serde(default)]
    name: String,
    state: InspectState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectState {
    running: bool,
    #[serde(default)]
    health: Option<InspectHealth>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectHealth {
    status: String,
}

impl InspectEntry {
    fn name(&self) -> &str {
        self.name.trim_start_matches('/')
    }

    fn status(&self) -> ContainerStatus {
        ContainerStatus {
            name: self.name().to_string(),
            running: self.state.running,
            health: self
                .state
                .health
                .as_ref()
                .and_then(|h| HealthStatus::parse(&h.status)),
        }
    }
}

fn parse_inspect(stdout: &[u8]) -> Result<Vec<InspectEntry>, RuntimeError> {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|e| RuntimeError::Parse(e.to_string()))
}

/// Map a failed CLI call's stderr onto the error taxonomy.
fn classify_failure(stderr: &[u8]) -> RuntimeError {
    let message = String::from_utf8_lossy(stderr).trim().to_string();
    let lower = message.to_lowercase();
    if lower.contains("no such container") || lower.contains("no such object") {
        RuntimeError::NotFound(message)
    } else if lower.contains("cannot connect to the docker daemon")
        || lower.contains("error during connect")
        || lower.contains("is the docker daemon running")
    {
        RuntimeError::Unavailable(message)
    } else {
        RuntimeError::CommandFailed(message)
    }
}

#[cfg(test)]
#[path = "docker_tests.rs"]
mod tests;
