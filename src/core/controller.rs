use std::sync::Arc;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use crate::core::command::CommandError;
use crate::gateway::metadata::MetadataResolver;
use crate::utils::sqlite::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub resolver: Arc<dyn MetadataResolver>,
}

impl AppState {
    pub fn new(db: Database, resolver: Arc<dyn MetadataResolver>) -> AppState {
        AppState {
            db,
            resolver,
        }
    }
}

// ErrorResponse is the JSON envelope returned for every failed request
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ServerError = (StatusCode, Json<ErrorResponse>);

fn server_error(message: &str) -> ServerError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: message.to_string() }))
}

// malformed client input has no validation layer of its own, it is reported like any other failure
pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    tracing::warn!(error = %err, "rejected malformed request body");
    server_error(format!("{}", err).as_str())
}

pub fn rejection_to_server_error(rejection: JsonRejection) -> ServerError {
    tracing::warn!(error = %rejection.body_text(), "rejected unreadable request body");
    server_error(rejection.body_text().as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        tracing::error!(error = ?err, "request failed");
        server_error(err.message())
    }
}
