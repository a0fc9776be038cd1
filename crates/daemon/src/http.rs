// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP surface: game API, static assets, health check.

mod error;
mod wire;

pub use error::ApiError;
pub use wire::{GamePayload, SetGameRequest, ShotRequest, StatEntry};

use std::path::Path;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use et_adapters::ContainerRuntime;
use et_core::ContainerId;
use et_engine::Game;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Build the router. `static_dir` is served under `/static`, its `index.html` at `/`.
pub fn build_router<R: ContainerRuntime>(game: Game<R>, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/shoot", post(shoot::<R>))
        .route("/api/getshot", post(get_shot::<R>))
        .route("/api/checkgame", get(check_game::<R>))
        .route("/api/setgame", post(set_game::<R>))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(game)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true}))
}

async fn shoot<R: ContainerRuntime>(
    State(game): State<Game<R>>,
    body: Result<Json<ShotRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = body?;
    let id = req.id.trim();
    if id.is_empty() {
        return Err(ApiError::bad_request("missing container id"));
    }
    if !is_container_ref(id) {
        return Err(ApiError::bad_request(format!("invalid container id: {id:?}")));
    }
    game.shoot(&ContainerId::new(id))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(StatusCode::OK)
}

/// Container ids and names: `[A-Za-z0-9_.-]`, not starting with `-`.
fn is_container_ref(id: &str) -> bool {
    !id.starts_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

async fn get_shot<R: ContainerRuntime>(
    State(game): State<Game<R>>,
) -> Result<StatusCode, ApiError> {
    game.get_shot()?;
    Ok(StatusCode::OK)
}

async fn check_game<R: ContainerRuntime>(
    State(game): State<Game<R>>,
) -> Result<Json<GamePayload>, ApiError> {
    let report = game.check().await?;
    Ok(Json(GamePayload::from(report)))
}

async fn set_game<R: ContainerRuntime>(
    State(game): State<Game<R>>,
    body: Result<Json<SetGameRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = body?;
    game.set_game(&req.kill_method, req.iterations).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
