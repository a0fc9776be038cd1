// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! et-core: domain types for the container recovery game

pub mod container;
pub mod game;
pub mod id;
pub mod kill_method;
pub mod recovery;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use container::{ContainerId, ContainerInfo, ContainerStatus, HealthStatus};
pub use game::{
    GameSettings, GameState, GameStatus, HitOutcome, RuleError, DEFAULT_MAX_SCORE,
    DEFAULT_TARGET_LABEL, STARTING_HP,
};
pub use id::ShortId;
pub use kill_method::KillMethod;
pub use recovery::{RecoveryRecord, RecoveryState};
pub use time_fmt::format_duration;
