//! Errors surfaced by the sample dispatcher.

use resource_routes::{MethodSet, ResourceError};
use thiserror::Error;

/// Errors that can occur while routing or serving a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no route matches `{0}`")]
    NotFound(String),

    #[error("method {method} not allowed on `{path}` (allowed: {allowed})")]
    MethodNotAllowed {
        path: String,
        method: String,
        allowed: MethodSet,
    },

    /// Two resources bound the same route with overlapping methods.
    #[error("route `{route}` bound twice for {methods}: `{first}` and `{second}`")]
    RouteConflict {
        route: String,
        methods: MethodSet,
        first: String,
        second: String,
    },

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("request body could not be encoded: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("dispatcher closed")]
    DispatcherClosed,

    #[error("dispatcher dropped response channel")]
    DispatcherDropped,

    /// The dispatcher task panicked or was cancelled.
    #[error("dispatcher task failed: {0}")]
    DispatcherTask(#[from] tokio::task::JoinError),
}

impl DispatchError {
    /// The HTTP status a server would answer with.
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::NotFound(_) => 404,
            DispatchError::MethodNotAllowed { .. } => 405,
            DispatchError::InvalidBody(_) => 400,
            DispatchError::Resource(ResourceError::UnknownAction { .. }) => 404,
            DispatchError::Resource(ResourceError::ActionFailed { .. }) => 400,
            DispatchError::Resource(ResourceError::MissingPrimaryKeyValue { .. }) => 400,
            DispatchError::Resource(_)
            | DispatchError::RouteConflict { .. }
            | DispatchError::DispatcherClosed
            | DispatchError::DispatcherDropped
            | DispatchError::DispatcherTask(_) => 500,
        }
    }
}
