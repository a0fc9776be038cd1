// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Container runtime CLI binary (default: `docker`).
pub fn docker_bin() -> String {
    std::env::var("ET_DOCKER_BIN")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "docker".to_string())
}

/// Timeout for a single runtime CLI call (default: 10000ms).
pub fn docker_timeout() -> Duration {
    parse_duration_ms("ET_DOCKER_TIMEOUT_MS").unwrap_or(crate::subprocess::DOCKER_TIMEOUT)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
