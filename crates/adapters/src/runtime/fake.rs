// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake container runtime for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ContainerRuntime, RuntimeError};
use async_trait::async_trait;
use et_core::{ContainerId, ContainerInfo, ContainerStatus, KillMethod};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Recorded runtime call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    ListHealthy { label: String },
    Kill { id: ContainerId, method: KillMethod },
    Inspect { id: ContainerId },
}

struct FakeContainer {
    labels: Vec<String>,
    current: ContainerStatus,
    /// Statuses returned by upcoming inspects; the last one sticks.
    script: VecDeque<ContainerStatus>,
    inspect_error: Option<RuntimeError>,
    kill_error: Option<RuntimeError>,
}

#[derive(Default)]
struct FakeRuntimeState {
    containers: HashMap<ContainerId, FakeContainer>,
    /// Insertion order, so listings are stable in tests
    order: Vec<ContainerId>,
    calls: Vec<RuntimeCall>,
    list_error: Option<RuntimeError>,
}

/// Fake container runtime for testing
#[derive(Clone, Default)]
pub struct FakeRuntime {
    inner: Arc<Mutex<FakeRuntimeState>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container carrying `label` in the given state.
    pub fn add_container(&self, id: &str, label: &str, status: ContainerStatus) {
        let mut inner = self.inner.lock();
        let id = ContainerId::new(id);
        if !inner.containers.contains_key(&id) {
            inner.order.push(id.clone());
        }
        inner.containers.insert(
            id,
            FakeContainer {
                labels: vec![label.to_string()],
                current: status,
                script: VecDeque::new(),
                inspect_error: None,
                kill_error: None,
            },
        );
    }

    /// Queue statuses for the next inspects of a container.
    ///
    /// Each inspect consumes one entry and makes it the current status;
    /// once the script runs out the last status keeps being reported.
    pub fn script(&self, id: &str, statuses: impl IntoIterator<Item = ContainerStatus>) {
        if let Some(container) = self.inner.lock().containers.get_mut(id) {
            container.script.extend(statuses);
        }
    }

    /// Replace a container's status, dropping any scripted statuses.
    pub fn set_status(&self, id: &str, status: ContainerStatus) {
        if let Some(container) = self.inner.lock().containers.get_mut(id) {
            container.script.clear();
            container.current = status;
        }
    }

    /// Remove a container; later calls report it as not found.
    pub fn remove_container(&self, id: &str) {
        let mut inner = self.inner.lock();
        inner.containers.remove(id);
        inner.order.retain(|c| c != id);
    }

    /// Make listings fail with the given error.
    pub fn fail_list(&self, error: Option<RuntimeError>) {
        self.inner.lock().list_error = error;
    }

    /// Make inspects of a container fail with the given error.
    pub fn fail_inspect(&self, id: &str, error: RuntimeError) {
        if let Some(container) = self.inner.lock().containers.get_mut(id) {
            container.inspect_error = Some(error);
        }
    }

    /// Make kills of a container fail with the given error.
    pub fn fail_kill(&self, id: &str, error: RuntimeError) {
        if let Some(container) = self.inner.lock().containers.get_mut(id) {
            container.kill_error = Some(error);
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.inner.lock().calls.clone()
    }

    /// Signals delivered so far, in order.
    pub fn kills(&self) -> Vec<(ContainerId, KillMethod)> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                RuntimeCall::Kill { id, method } => Some((id.clone(), *method)),
                _ => None,
            })
            .collect()
    }

    /// Number of inspects issued for a container.
    pub fn inspect_count(&self, id: &str) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, RuntimeCall::Inspect { id: cid } if cid == id))
            .count()
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn list_healthy(&self, label: &str) -> Result<Vec<ContainerInfo>, RuntimeError> {
        let mut inner = self.inner.lock();

        inner.calls.push(RuntimeCall::ListHealthy {
            label: label.to_string(),
        });

        if let Some(err) = &inner.list_error {
            return Err(err.clone());
        }

        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.containers.get(id).map(|c| (id, c)))
            .filter(|(_, c)| c.labels.iter().any(|l| l == label) && c.current.is_healthy())
            .map(|(id, c)| ContainerInfo::new(id.clone(), c.current.name.clone()))
            .collect())
    }

    async fn kill(&self, id: &ContainerId, method: KillMethod) -> Result<(), RuntimeError> {
        let mut inner = self.inner.lock();

        inner.calls.push(RuntimeCall::Kill {
            id: id.clone(),
            method,
        });

        match inner.containers.get(id) {
            Some(container) => match &container.kill_error {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            },
            None => Err(RuntimeError::NotFound(id.to_string())),
        }
    }

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerStatus, RuntimeError> {
        let mut inner = self.inner.lock();

        inner.calls.push(RuntimeCall::Inspect { id: id.clone() });

        let container = inner
            .containers
            .get_mut(id)
            .ok_or_else(|| RuntimeError::NotFound(id.to_string()))?;
        if let Some(err) = &container.inspect_error {
            return Err(err.clone());
        }
        if let Some(next) = container.script.pop_front() {
            container.current = next;
        }
        Ok(container.current.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
