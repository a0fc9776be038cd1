// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Recovery tracking engine and game state machine

mod error;
mod game;
mod ledger;
mod tracker;

pub use error::GameError;
pub use game::{Game, GameConfig, GameReport};
pub use ledger::{RecoveryLedger, TrackerTicket};
pub use tracker::{spawn_tracker, track_recovery, TrackedKill, TrackerConfig};
