// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Env Tester Daemon (etd)
//!
//! Serves the shooting game: players kill labelled containers and the
//! daemon measures how long each one takes to recover.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use et_adapters::{DockerCliRuntime, TracedRuntime};
use et_daemon::{build_router, Config};
use et_engine::Game;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run,
    Help,
    Version,
    Unknown(String),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Command {
    match args.nth(1) {
        None => Command::Run,
        Some(arg) => match arg.as_str() {
            "--version" | "-V" | "-v" => Command::Version,
            "--help" | "-h" | "help" => Command::Help,
            _ => Command::Unknown(arg),
        },
    }
}

fn print_help() {
    println!("etd {VERSION}");
    println!("Env Tester Daemon - kill containers, measure their recovery");
    println!();
    println!("USAGE:");
    println!("    etd");
    println!();
    println!("Configuration is read from the environment:");
    println!("    ET_BIND                listen address (default 0.0.0.0:8080)");
    println!("    ET_STATIC_DIR          web assets (default ./web)");
    println!("    ET_TARGET_LABEL        label of in-play containers (default tested=true)");
    println!("    ET_WEAPON              initial kill method (default SIGKILL)");
    println!("    ET_MAX_SCORE           initial score target (default 5)");
    println!("    ET_DOCKER_BIN          runtime CLI (default docker)");
    println!("    ET_DOCKER_TIMEOUT_MS   per-call timeout (default 10000)");
    println!("    ET_POLL_MS             recovery poll interval (default 500)");
    println!("    ET_DEGRADE_TIMEOUT_MS  wait for the kill to show (default 30000)");
    println!("    ET_RECOVER_TIMEOUT_MS  wait for recovery (default 30000)");
    println!("    ET_LOG_DIR             write logs to <dir>/etd.log instead of stdout");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before any config is read
    match parse_args(std::env::args()) {
        Command::Run => {}
        Command::Version => {
            println!("etd {VERSION}");
            return Ok(());
        }
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Unknown(arg) => {
            eprintln!("error: unexpected argument '{arg}'");
            eprintln!("Usage: etd [--help | --version]");
            std::process::exit(1);
        }
    }

    let config = Config::load()?;
    let _log_guard = setup_logging(&config)?;

    info!(
        version = VERSION,
        target_label = %config.game.target_label,
        weapon = %config.game.settings.weapon(),
        max_score = config.game.settings.max_score(),
        "starting"
    );

    let runtime = TracedRuntime::new(DockerCliRuntime::new());
    let game = Game::new(runtime, config.game.clone());
    let app = build_router(game, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, static_dir = %config.static_dir.display(), "listening");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
            }
        })
        .await?;

    info!("Daemon stopped");
    Ok(())
}

fn setup_logging(
    config: &Config,
) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = match config.log_path() {
        Some(path) => {
            let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid log path: {}", path.display()),
                ));
            };
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            tracing_appender::non_blocking(file_appender)
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
