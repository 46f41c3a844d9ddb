//! Error types for the todo client core.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body for debugging.

use thiserror::Error;

use crate::state::Operation;
use crate::types::TodoId;

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// The host could not complete the round-trip at all (connection refused,
/// DNS failure, reset). Produced by transports, never by the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

/// Rejected local state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("todo {0} is not in the list")]
    UnknownTodo(TodoId),
}

/// Failure of a controller operation, as returned by `complete`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A typed `complete_*` was handed a request issued for another operation.
    #[error("expected a {expected} request, got {actual:?}")]
    OperationMismatch {
        expected: &'static str,
        actual: Operation,
    },
}
