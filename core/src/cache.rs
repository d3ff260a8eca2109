//! Notebooks seen from the remote store, keyed by GUID.
//!
//! Updating a notebook needs the full remote record (update sequence number,
//! default flag) but callers only hold the internal `Notebook`, so every
//! notebook the adapter receives is remembered here.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::types::{Guid, RemoteNotebook};

#[derive(Debug, Default)]
pub struct NotebookCache {
    books: RwLock<HashMap<Guid, RemoteNotebook>>,
}

impl NotebookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `notebook`, replacing any previous entry with the same GUID.
    /// Notebooks without a GUID cannot be looked up and are ignored.
    pub fn insert(&self, notebook: RemoteNotebook) {
        let Some(guid) = notebook.guid.clone() else {
            trace!("ignoring notebook without guid");
            return;
        };
        self.books
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(guid, notebook);
    }

    /// A copy of the cached notebook for `guid`.
    pub fn get(&self, guid: &str) -> Result<RemoteNotebook> {
        let books = self.books.read().unwrap_or_else(PoisonError::into_inner);
        if books.is_empty() {
            warn!(guid, "notebook cache is empty");
            return Err(Error::NoNotebookCached);
        }
        books.get(&Guid::from(guid)).cloned().ok_or_else(|| {
            warn!(guid, "notebook not in cache");
            Error::NoNotebookFound
        })
    }

    pub fn len(&self) -> usize {
        self.books.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.books.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
