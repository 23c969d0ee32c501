//! Application error type mapping domain errors to HTTP responses.
//!
//! Only validation errors are user-visible failures (400). Storage trouble
//! surfaces as 500 for the single mutating call that hit it; reads never
//! error at all because the stores degrade to empty state.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use station_core::chat::ChatError;
use station_types::error::{AgentError, ChatLogError, RegistryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Rejected at the boundary; never touched a store.
    Validation(AgentError),
    /// Agent registry failure.
    Registry(RegistryError),
    /// Chat log failure.
    ChatLog(ChatLogError),
}

impl From<AgentError> for AppError {
    fn from(e: AgentError) -> Self {
        AppError::Validation(e)
    }
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        AppError::Registry(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Invalid(err) => AppError::Validation(err),
            ChatError::Log(err) => AppError::ChatLog(err),
        }
    }
}

impl AppError {
    fn status_code_and_label(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Registry(_) => (StatusCode::INTERNAL_SERVER_ERROR, "REGISTRY_ERROR"),
            AppError::ChatLog(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CHAT_LOG_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_code_and_label();
        let message = match &self {
            AppError::Validation(e) => e.to_string(),
            AppError::Registry(e) => e.to_string(),
            AppError::ChatLog(e) => e.to_string(),
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
