//! Error types for the todo sync client.
//!
//! # Design
//! `Network` and `Decode` are the two failure kinds of the collection
//! contract. `NotFound` gets a dedicated variant because callers frequently
//! distinguish "the item no longer exists" from "the server returned an
//! unexpected status". Everything else non-2xx lands in `Status`.

use thiserror::Error;

use crate::types::TodoId;

/// Errors returned by `TodoClient` and `TodoSync`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request could not be completed by the transport.
    #[error("network error: {0}")]
    Network(String),

    /// The response body is not a valid item or item sequence.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The server returned 404.
    #[error("item not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// `create` was called with an empty name; no request was sent.
    #[error("item name must not be empty")]
    EmptyName,

    /// The id is not present in the local view.
    #[error("no item with id {0} in the local view")]
    UnknownItem(TodoId),
}

impl SyncError {
    /// True when the request never reached a server answer and may be retried.
    pub fn is_network(&self) -> bool {
        matches!(self, SyncError::Network(_))
    }
}
