// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON request and response bodies.

use et_core::{format_duration, ContainerInfo, GameStatus, KillMethod, RecoveryRecord};
use et_engine::GameReport;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/shoot`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShotRequest {
    pub id: String,
}

/// Body of `POST /api/setgame`. Values are validated by the game, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct SetGameRequest {
    pub kill_method: String,
    pub iterations: i64,
}

/// Body of `GET /api/checkgame`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePayload {
    pub status: GameStatus,
    pub enemies: Vec<ContainerInfo>,
    pub hp: i32,
    pub score: u32,
    pub max_score: u32,
    pub weapon: KillMethod,
    pub session: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<StatEntry>>,
}

/// A recovery record plus a human-readable recovery time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    #[serde(flatten)]
    pub record: RecoveryRecord,
    pub ttr_display: String,
}

impl From<RecoveryRecord> for StatEntry {
    fn from(record: RecoveryRecord) -> Self {
        let ttr_display = format_duration(record.time_to_recover);
        Self {
            record,
            ttr_display,
        }
    }
}

impl From<GameReport> for GamePayload {
    fn from(report: GameReport) -> Self {
        Self {
            status: report.status,
            enemies: report.enemies,
            hp: report.hp,
            score: report.score,
            max_score: report.max_score,
            weapon: report.weapon,
            session: report.session,
            stats: report
                .stats
                .map(|records| records.into_iter().map(StatEntry::from).collect()),
        }
    }
}
