// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error responses: `{"error": "<message>"}` with a status code.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use et_engine::GameError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Rejected player actions are the client's fault; runtime failures are ours.
impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::GameOver | GameError::InvalidConfiguration(_) => {
                Self::bad_request(err.to_string())
            }
            GameError::InjectionFailed(_) | GameError::RuntimeUnavailable(_) => {
                Self::internal(err.to_string())
            }
        }
    }
}

/// Any unreadable body (syntax, shape, content type) is a bad request.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, message = %self.message, "request failed");
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
