// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signals the player can fire at a container.

use crate::game::RuleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signal delivered to every process in the target container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KillMethod {
    #[default]
    #[serde(rename = "SIGKILL")]
    Sigkill,
    #[serde(rename = "SIGTERM")]
    Sigterm,
    #[serde(rename = "SIGSEGV")]
    Sigsegv,
}

impl KillMethod {
    pub const ALL: [KillMethod; 3] = [KillMethod::Sigkill, KillMethod::Sigterm, KillMethod::Sigsegv];

    /// Signal name as accepted by `kill -s`.
    pub fn as_str(&self) -> &'static str {
        match self {
            KillMethod::Sigkill => "SIGKILL",
            KillMethod::Sigterm => "SIGTERM",
            KillMethod::Sigsegv => "SIGSEGV",
        }
    }
}

impl fmt::Display for KillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KillMethod {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KillMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| RuleError::InvalidConfiguration(format!("unknown kill method: {s:?}")))
    }
}

#[cfg(test)]
#[path = "kill_method_tests.rs"]
mod tests;
