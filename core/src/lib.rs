//! Adapter from an internal note model to a remote note-storage API.
//!
//! # Overview
//! `Notestore` maps `Notebook`, `Note` and `NoteFilter` onto the remote
//! store's structures, validates inputs the remote would reject, and keeps
//! a GUID-keyed cache of notebooks it has seen so they can be updated
//! later. All remote access goes through the `NoteStoreApi` trait.
//!
//! # Design
//! - `NoteStoreClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`.
//! - `Transport` executes the round-trip; `RemoteNoteStore` composes the
//!   two into a `NoteStoreApi`.
//! - Remote errors are never rewritten: `Error::Api` displays them as-is.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod notestore;
pub mod transport;
pub mod types;

pub use api::NoteStoreApi;
pub use cache::NotebookCache;
pub use client::NoteStoreClient;
pub use config::NoteStoreConfig;
pub use error::{ApiError, Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use model::{Note, NoteFilter, Notebook};
pub use notestore::Notestore;
pub use transport::{RemoteNoteStore, Transport, UreqTransport};
pub use types::{Guid, NoteList, RemoteNote, RemoteNoteFilter, RemoteNotebook};
