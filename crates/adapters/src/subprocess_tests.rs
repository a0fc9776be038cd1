// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sh(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", script]);
    cmd
}

#[tokio::test]
async fn captures_stdout_and_stderr() {
    let output = run_with_timeout(sh("echo out; echo err >&2"), DOCKER_TIMEOUT, "sh")
        .await
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "out");
    assert_eq!(String::from_utf8_lossy(&output.stderr).trim(), "err");
}

#[tokio::test]
async fn nonzero_exit_is_returned_not_raised() {
    let output = run_with_timeout(sh("exit 3"), DOCKER_TIMEOUT, "sh")
        .await
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[tokio::test]
async fn missing_binary_names_the_call() {
    let cmd = Command::new("/nonexistent/docker");
    let err = run_with_timeout(cmd, DOCKER_TIMEOUT, "docker ps")
        .await
        .unwrap_err();
    assert!(err.starts_with("docker ps failed:"), "got: {}", err);
}

#[tokio::test]
async fn slow_command_times_out() {
    let err = run_with_timeout(sh("sleep 10"), Duration::from_millis(100), "docker inspect")
        .await
        .unwrap_err();
    assert_eq!(err, "docker inspect timed out after 100ms");
}
