//! Error types raised by the sample action handlers.

use thiserror::Error;

/// Errors that can occur inside sample handlers.
///
/// Handlers return them through `?`; the core boxes them into
/// [`ResourceError::ActionFailed`](resource_routes::ResourceError::ActionFailed).
#[derive(Debug, Error)]
pub enum SampleError {
    /// No stored entity under this key.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A URL parameter was absent or not a number.
    #[error("invalid url parameter `{name}`: {value:?}")]
    InvalidParam { name: &'static str, value: Option<String> },

    /// The requested quantity exceeds the available stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl SampleError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        SampleError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Parses a numeric URL parameter.
pub(crate) fn id_param(
    request: &resource_routes::RequestContainer,
    name: &'static str,
) -> Result<u64, SampleError> {
    let value = request.url_param(name);
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| SampleError::InvalidParam {
            name,
            value: value.map(str::to_string),
        })
}
