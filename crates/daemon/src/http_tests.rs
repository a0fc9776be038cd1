// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use axum::body::Body;
use axum::http::Request;
use et_adapters::{FakeRuntime, RuntimeError};
use et_core::test_support::{healthy, unhealthy};
use et_core::{GameSettings, GameStatus, KillMethod};
use et_engine::GameConfig;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

const LABEL: &str = "tested=true";

struct TestApp {
    router: Router,
    runtime: FakeRuntime,
    game: Game<FakeRuntime>,
    _static_dir: tempfile::TempDir,
}

fn app(max_score: i64) -> TestApp {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<h1>shoot</h1>").unwrap();
    std::fs::write(static_dir.path().join("game.js"), "// game").unwrap();

    let runtime = FakeRuntime::new();
    let game = Game::new(
        runtime.clone(),
        GameConfig {
            settings: GameSettings::new(KillMethod::Sigkill, max_score).unwrap(),
            ..GameConfig::default()
        },
    );
    TestApp {
        router: build_router(game.clone(), static_dir.path()),
        runtime,
        game,
        _static_dir: static_dir,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn post(&self, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn check(&self) -> Value {
        let (status, body) = self.get("/api/checkgame").await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    /// Target that is down on the first poll and back on the second.
    fn add_target(&self, id: &str) {
        self.runtime.add_container(id, LABEL, healthy("web"));
        self.runtime.script(id, [unhealthy("web"), healthy("web")]);
    }
}

fn error_message(body: &[u8]) -> String {
    let json: Value = serde_json::from_slice(body).unwrap();
    json["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app(5);
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({"ok": true}));
}

#[tokio::test]
async fn serves_index_and_static_assets() {
    let app = app(5);

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>shoot</h1>");

    let (status, body) = app.get("/static/game.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"// game");

    let (status, _) = app.get("/static/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkgame_reports_fresh_game() {
    let app = app(5);
    app.add_target("a");
    app.runtime.add_container("b", LABEL, unhealthy("db"));

    let json = app.check().await;

    assert_eq!(
        json,
        json!({
            "status": "PLAYING",
            "enemies": [{"id": "a", "name": "web"}],
            "hp": 3,
            "score": 0,
            "max_score": 5,
            "weapon": "SIGKILL",
            "session": 1,
        })
    );
}

#[tokio::test]
async fn checkgame_fails_when_runtime_is_down() {
    let app = app(5);
    app.runtime
        .fail_list(Some(RuntimeError::Unavailable("daemon down".into())));

    let (status, body) = app.get("/api/checkgame").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("daemon down"));
}

#[tokio::test]
async fn shoot_scores() {
    let app = app(5);
    app.add_target("a");

    let (status, _) = app.post("/api/shoot", r#"{"id": "a"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.check().await["score"], 1);
    assert_eq!(app.runtime.kills().len(), 1);
}

#[yare::parameterized(
    not_json = { "shoot!" },
    wrong_shape = { r#"{"target": "a"}"# },
    wrong_type = { r#"{"id": 7}"# },
    blank_id = { r#"{"id": "  "}"# },
    flag_id = { r#"{"id": "--user=root"}"# },
    dash_id = { r#"{"id": "-a"}"# },
    spaced_id = { r#"{"id": "a b"}"# },
    path_id = { r#"{"id": "../a"}"# },
    shell_id = { r#"{"id": "a;reboot"}"# },
)]
#[test_macro(tokio::test)]
async fn shoot_rejects_malformed_body(body: &str) {
    let app = app(5);
    app.add_target("a");

    let (status, body) = app.post("/api/shoot", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());
    assert!(app.runtime.kills().is_empty());
}

#[yare::parameterized(
    short_hex = { "aaa111" },
    full_hex = { "4f1d2c3b4a5968778695a4b3c2d1e0f00112233445566778899aabbccddeeff0" },
    compose_name = { "shop_web.1-x" },
)]
#[test_macro(tokio::test)]
async fn shoot_accepts_container_refs(id: &str) {
    let app = app(5);
    app.add_target(id);

    let (status, _) = app.post("/api/shoot", &json!({ "id": id }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.runtime.kills().len(), 1);
}

#[tokio::test]
async fn shoot_failure_is_a_server_error() {
    let app = app(5);

    let (status, body) = app.post("/api/shoot", r#"{"id": "ghost"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("kill injection failed"));
    assert_eq!(app.check().await["score"], 0);
}

#[tokio::test]
async fn shoot_after_defeat_is_a_server_error() {
    let app = app(5);
    app.add_target("a");
    for _ in 0..3 {
        let (status, _) = app.post("/api/getshot", "").await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.post("/api/shoot", r#"{"id": "a"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).contains("already finished"));
}

#[tokio::test]
async fn getshot_after_defeat_is_rejected() {
    let app = app(5);
    for _ in 0..3 {
        app.post("/api/getshot", "").await;
    }
    let json = app.check().await;
    assert_eq!(json["status"], "DEFEAT");
    assert_eq!(json["hp"], 0);

    let (status, _) = app.post("/api/getshot", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.check().await["hp"], 0);
}

#[tokio::test]
async fn setgame_resets_after_defeat() {
    let app = app(5);
    for _ in 0..3 {
        app.post("/api/getshot", "").await;
    }

    let (status, _) = app
        .post("/api/setgame", r#"{"kill_method": "SIGTERM", "iterations": 2}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    let json = app.check().await;
    assert_eq!(json["status"], "PLAYING");
    assert_eq!(json["hp"], 3);
    assert_eq!(json["score"], 0);
    assert_eq!(json["max_score"], 2);
    assert_eq!(json["weapon"], "SIGTERM");
    assert_eq!(json["session"], 2);
}

#[yare::parameterized(
    unknown_method = { r#"{"kill_method": "BOGUS", "iterations": 5}"# },
    zero_iterations = { r#"{"kill_method": "SIGKILL", "iterations": 0}"# },
    negative_iterations = { r#"{"kill_method": "SIGKILL", "iterations": -1}"# },
    fractional_iterations = { r#"{"kill_method": "SIGKILL", "iterations": 2.5}"# },
    missing_field = { r#"{"kill_method": "SIGKILL"}"# },
)]
#[test_macro(tokio::test)]
async fn setgame_rejects_invalid_settings(body: &str) {
    let app = app(5);
    app.post("/api/getshot", "").await;

    let (status, _) = app.post("/api/setgame", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = app.check().await;
    assert_eq!(json["hp"], 2);
    assert_eq!(json["session"], 1);
}

#[tokio::test(start_paused = true)]
async fn victory_reports_stats() {
    let app = app(2);
    app.add_target("a");
    app.add_target("b");

    app.post("/api/shoot", r#"{"id": "a"}"#).await;
    app.post("/api/shoot", r#"{"id": "b"}"#).await;
    let json = app.check().await;
    assert_eq!(json["status"], "FINALIZING");
    assert!(json.get("stats").is_none());

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(app.game.state().status, GameStatus::Victory);

    let json = app.check().await;
    assert_eq!(json["status"], "VICTORY");
    let stats = json["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(
        stats[0],
        json!({
            "container": {"id": "a", "name": "web"},
            "kill_method": "SIGKILL",
            "ttr": 500_000_000u64,
            "state": "RECOVERED",
            "session": 1,
            "ttr_display": "500ms",
        })
    );
}

#[tokio::test]
async fn serves_bundled_front_end() {
    let web = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../web");
    let router = build_router(Game::new(FakeRuntime::new(), GameConfig::default()), &web);

    let response = router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(Request::get("/static/game.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let script = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let script = String::from_utf8_lossy(&script);
    // Container names come from the runtime and must never be parsed as markup
    assert!(script.contains("textContent"));
    assert!(!script.contains("innerHTML"));
}
