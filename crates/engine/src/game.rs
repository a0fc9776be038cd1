// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Game state machine: validates player actions and drives the kill pipeline.
//!
//! State lives behind one `RwLock` that is never held across an await.
//! Shots are serialized by a separate async trigger lock so the signal can be
//! delivered without blocking status reads, while two shots still cannot both
//! pass the score target.

use crate::error::GameError;
use crate::ledger::RecoveryLedger;
use crate::tracker::{spawn_tracker, TrackedKill, TrackerConfig};
use et_adapters::ContainerRuntime;
use et_core::{
    ContainerId, ContainerInfo, GameSettings, GameState, GameStatus, HitOutcome, KillMethod,
    RecoveryRecord, DEFAULT_TARGET_LABEL,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// Settings for a new [`Game`].
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub target_label: String,
    pub settings: GameSettings,
    pub tracker: TrackerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_label: DEFAULT_TARGET_LABEL.to_string(),
            settings: GameSettings::default(),
            tracker: TrackerConfig::default(),
        }
    }
}

/// Consistent view of the game returned by [`Game::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub status: GameStatus,
    pub enemies: Vec<ContainerInfo>,
    pub hp: i32,
    pub score: u32,
    pub max_score: u32,
    pub weapon: KillMethod,
    pub session: u64,
    /// Recovery records, only once the game is won.
    pub stats: Option<Vec<RecoveryRecord>>,
}

struct Session {
    number: u64,
    state: GameState,
    ledger: Arc<RecoveryLedger>,
}

struct GameInner<R> {
    runtime: R,
    tracker: TrackerConfig,
    session: RwLock<Session>,
    trigger: tokio::sync::Mutex<()>,
}

/// Handle to the active game. Cheap to clone; all clones share state.
pub struct Game<R> {
    inner: Arc<GameInner<R>>,
}

impl<R> Clone for Game<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ContainerRuntime> Game<R> {
    pub fn new(runtime: R, config: GameConfig) -> Self {
        let session = Session {
            number: 1,
            state: GameState::new(config.settings, config.target_label),
            ledger: Arc::new(RecoveryLedger::new(1)),
        };
        Self {
            inner: Arc::new(GameInner {
                runtime,
                tracker: config.tracker,
                session: RwLock::new(session),
                trigger: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Fire the current weapon at a container.
    ///
    /// The score only moves once the signal is delivered. Reaching the score
    /// target moves the game to finalizing; victory follows in the background
    /// once every tracker of this session has finished.
    pub async fn shoot(&self, id: &ContainerId) -> Result<(), GameError> {
        let _trigger = self.inner.trigger.lock().await;

        let weapon = {
            let session = self.inner.session.read();
            session.state.ensure_playing()?;
            session.state.weapon
        };

        self.inner
            .runtime
            .kill(id, weapon)
            .await
            .map_err(GameError::InjectionFailed)?;

        let mut session = self.inner.session.write();
        let number = session.number;

        // The signal is out, so the kill is tracked even if the game ended meanwhile
        spawn_tracker(
            self.inner.runtime.clone(),
            &session.ledger,
            TrackedKill {
                container: id.clone(),
                method: weapon,
                session: number,
            },
            self.inner.tracker,
        );

        match session.state.record_hit() {
            Ok(HitOutcome::Scored) => {
                tracing::info!(
                    session = number,
                    id = id.short(12),
                    score = session.state.score,
                    max_score = session.state.max_score,
                    "hit"
                );
            }
            Ok(HitOutcome::TargetReached) => {
                tracing::info!(
                    session = number,
                    id = id.short(12),
                    score = session.state.score,
                    pending = session.ledger.pending(),
                    "score target reached, waiting for trackers"
                );
                self.spawn_finalizer(number, Arc::clone(&session.ledger));
            }
            Err(e) => {
                tracing::warn!(
                    session = number,
                    id = id.short(12),
                    status = %session.state.status,
                    "game ended while the signal was in flight"
                );
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// The player takes a hit.
    pub fn get_shot(&self) -> Result<(), GameError> {
        let mut session = self.inner.session.write();
        session.state.take_damage()?;
        if session.state.status == GameStatus::Defeat {
            tracing::info!(session = session.number, "defeat");
        } else {
            tracing::info!(session = session.number, hp = session.state.hp, "player hit");
        }
        Ok(())
    }

    /// Report game state, the healthy targets, and (after victory) recovery stats.
    pub async fn check(&self) -> Result<GameReport, GameError> {
        let (number, state, ledger) = {
            let session = self.inner.session.read();
            (
                session.number,
                session.state.clone(),
                Arc::clone(&session.ledger),
            )
        };

        let enemies = self
            .inner
            .runtime
            .list_healthy(&state.target_label)
            .await
            .map_err(GameError::RuntimeUnavailable)?;

        let stats = (state.status == GameStatus::Victory).then(|| ledger.snapshot());

        Ok(GameReport {
            status: state.status,
            enemies,
            hp: state.hp,
            score: state.score,
            max_score: state.max_score,
            weapon: state.weapon,
            session: number,
            stats,
        })
    }

    /// Start a new game with the given weapon and score target.
    ///
    /// The new session gets a fresh ledger. Trackers from earlier sessions
    /// keep running and report into their own session's ledger.
    pub async fn set_game(&self, weapon: &str, max_score: i64) -> Result<(), GameError> {
        let settings = GameSettings::parse(weapon, max_score)?;

        let _trigger = self.inner.trigger.lock().await;
        let mut session = self.inner.session.write();
        let orphaned = session.ledger.pending();
        session.number += 1;
        session.state.reset(settings);
        session.ledger = Arc::new(RecoveryLedger::new(session.number));

        tracing::info!(
            session = session.number,
            weapon = %settings.weapon(),
            max_score = settings.max_score(),
            orphaned_trackers = orphaned,
            "new game"
        );
        Ok(())
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> GameState {
        self.inner.session.read().state.clone()
    }

    /// Current session number.
    pub fn session(&self) -> u64 {
        self.inner.session.read().number
    }

    /// Ledger of the current session.
    pub fn ledger(&self) -> Arc<RecoveryLedger> {
        Arc::clone(&self.inner.session.read().ledger)
    }

    fn spawn_finalizer(&self, number: u64, ledger: Arc<RecoveryLedger>) {
        let game = self.clone();
        tokio::spawn(async move {
            ledger.wait_idle().await;
            let mut session = game.inner.session.write();
            if session.number != number {
                tracing::debug!(session = number, "game was reset before finalizing");
                return;
            }
            if session.state.declare_victory() {
                tracing::info!(session = number, records = ledger.len(), "victory");
            }
        });
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod tests;
