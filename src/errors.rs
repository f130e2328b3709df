// errors.rs
use crate::catalog::ActionError;
use thiserror::Error;

/// Errors surfaced by route handlers.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Upstream Error: {0}")]
    Upstream(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl From<ActionError> for ServerError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::UnknownListing { .. } => ServerError::NotFound,
        }
    }
}
