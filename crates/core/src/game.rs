// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Game rules: status, health points, score.
//!
//! `GameState` holds the pure transitions. Locking, fault injection and the
//! wait for in-flight recovery trackers live in the engine.

use crate::kill_method::KillMethod;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Health points at the start of every game.
pub const STARTING_HP: i32 = 3;

/// Runtime label selecting the containers that are in play.
pub const DEFAULT_TARGET_LABEL: &str = "tested=true";

/// Score target of a game started without explicit settings.
pub const DEFAULT_MAX_SCORE: u32 = 5;

/// A player action that the rules reject. State is never changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("game has already finished")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Playing,
    /// Score target reached; waiting for recovery trackers to finish.
    Finalizing,
    Victory,
    Defeat,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Victory | GameStatus::Defeat)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Playing => write!(f, "PLAYING"),
            GameStatus::Finalizing => write!(f, "FINALIZING"),
            GameStatus::Victory => write!(f, "VICTORY"),
            GameStatus::Defeat => write!(f, "DEFEAT"),
        }
    }
}

/// Validated weapon and score target for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    weapon: KillMethod,
    max_score: u32,
}

impl GameSettings {
    /// Validate a score target. Non-positive targets are rejected.
    pub fn new(weapon: KillMethod, max_score: i64) -> Result<Self, RuleError> {
        if max_score <= 0 {
            return Err(RuleError::InvalidConfiguration(format!(
                "score target must be positive, got {max_score}"
            )));
        }
        let max_score = u32::try_from(max_score).map_err(|_| {
            RuleError::InvalidConfiguration(format!("score target too large: {max_score}"))
        })?;
        Ok(Self { weapon, max_score })
    }

    /// Validate a signal name and score target as received from a player.
    pub fn parse(weapon: &str, max_score: i64) -> Result<Self, RuleError> {
        Self::new(weapon.parse()?, max_score)
    }

    pub fn weapon(&self) -> KillMethod {
        self.weapon
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            weapon: KillMethod::default(),
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

/// What a landed shot did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Score went up; the game continues.
    Scored,
    /// Score reached the target; the game is now finalizing.
    TargetReached,
}

/// Player-visible state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub hp: i32,
    pub score: u32,
    pub max_score: u32,
    pub weapon: KillMethod,
    pub target_label: String,
}

impl GameState {
    pub fn new(settings: GameSettings, target_label: impl Into<String>) -> Self {
        Self {
            status: GameStatus::Playing,
            hp: STARTING_HP,
            score: 0,
            max_score: settings.max_score,
            weapon: settings.weapon,
            target_label: target_label.into(),
        }
    }

    /// Player actions are only accepted while playing.
    pub fn ensure_playing(&self) -> Result<(), RuleError> {
        match self.status {
            GameStatus::Playing => Ok(()),
            _ => Err(RuleError::GameOver),
        }
    }

    /// Count a delivered kill.
    pub fn record_hit(&mut self) -> Result<HitOutcome, RuleError> {
        self.ensure_playing()?;
        self.score += 1;
        if self.score >= self.max_score {
            self.status = GameStatus::Finalizing;
            Ok(HitOutcome::TargetReached)
        } else {
            Ok(HitOutcome::Scored)
        }
    }

    /// The player got hit. Losing the last health point ends the game.
    pub fn take_damage(&mut self) -> Result<(), RuleError> {
        self.ensure_playing()?;
        self.hp -= 1;
        if self.hp <= 0 {
            self.status = GameStatus::Defeat;
        }
        Ok(())
    }

    /// Move a finalizing game to victory. Returns false if the game was not finalizing.
    pub fn declare_victory(&mut self) -> bool {
        if self.status != GameStatus::Finalizing {
            return false;
        }
        self.status = GameStatus::Victory;
        true
    }

    /// Start over with new settings. The target label is kept.
    pub fn reset(&mut self, settings: GameSettings) {
        self.status = GameStatus::Playing;
        self.hp = STARTING_HP;
        self.score = 0;
        self.max_score = settings.max_score;
        self.weapon = settings.weapon;
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod tests;
