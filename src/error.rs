use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Body returned to callers for every failure; details stay in the server log.
pub const SERVER_ERROR_BODY: &str = "server error occurred";

#[derive(Error, Debug)]
pub enum PbpError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Game {0} not scheduled for today!")]
    NotFound(String),

    #[error("today metadata has no `{0}` link")]
    MissingKey(String),

    #[error("play-by-play lookup task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for PbpError {
    fn into_response(self) -> Response {
        error!(error = %self, "error retrieving game");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": SERVER_ERROR_BODY })),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid listen address {value:?} in {var}: {source}")]
    ListenAddr {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid timeout {value:?} in {var}: {source}")]
    Timeout {
        var: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
