//! Error types for the remote API and the notestore adapter.
//!
//! # Design
//! `ApiError` describes anything that went wrong talking to the remote note
//! store. The adapter never rewrites those: `Error::Api` displays the inner
//! error unchanged so callers see exactly what the remote reported. The
//! remaining `Error` variants are validation and cache failures raised
//! before any remote call is made.

use thiserror::Error;

/// Failures reported by a `NoteStoreApi` implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404 for the requested notebook or note.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the authentication token.
    #[error("authentication token rejected")]
    Unauthorized,

    /// The server returned a non-2xx status other than 401 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced an HTTP response.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

/// Failures returned by `Notestore` operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no notebooks have been cached")]
    NoNotebookCached,

    #[error("notebook not found in cache")]
    NoNotebookFound,

    #[error("no GUID set")]
    NoGuidSet,

    #[error("no title set")]
    NoTitleSet,

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, Error>;
