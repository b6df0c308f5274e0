//! Core errors.

use thiserror::Error;

/// Errors surfaced by the sidebar's collaborators.
///
/// None of these are fatal to the dashboard; callers log them and carry on
/// rendering the last known state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No endpoint URL is stored in the session.
    #[error("dae endpoint is not configured")]
    NotConfigured,

    /// Request never produced a response body.
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a GraphQL `errors` array.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration parsed but holds values the dashboard cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
