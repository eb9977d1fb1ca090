//! API error kinds.
//!
//! Handlers fail with an `ApiError`; the message catalog turns it into a
//! `Rejection` with localized text before it reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use friendgraph_graph::GraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body could not be parsed. Nothing was attempted.
    #[error("malformed request body: {0}")]
    MalformedRequest(String),

    /// A store precondition failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The response body could not be serialized.
    #[error("failed to encode response: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Graph(GraphError::UnknownUser(_) | GraphError::UnknownPair { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Graph(GraphError::EmptyCollection) => StatusCode::NOT_FOUND,
            ApiError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A plain-text error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status, format!("{}\n", self.message)).into_response()
    }
}

/// Errors from running the server itself.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
