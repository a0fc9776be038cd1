// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for game operations

use et_adapters::RuntimeError;
use et_core::RuleError;
use thiserror::Error;

/// Errors surfaced by [`Game`](crate::Game) operations
#[derive(Debug, Error)]
pub enum GameError {
    #[error("game has already finished")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("kill injection failed: {0}")]
    InjectionFailed(#[source] RuntimeError),
    #[error("container runtime unavailable: {0}")]
    RuntimeUnavailable(#[source] RuntimeError),
}

impl From<RuleError> for GameError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::GameOver => GameError::GameOver,
            RuleError::InvalidConfiguration(msg) => GameError::InvalidConfiguration(msg),
        }
    }
}
