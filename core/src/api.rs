//! The seam between the adapter and the remote note store.
//!
//! `Notestore` only ever talks to the remote through this trait, so tests
//! substitute a closure-backed double and production code plugs in
//! `RemoteNoteStore`. Every call takes the authentication token first.

use crate::error::ApiError;
use crate::types::{Guid, NoteList, RemoteNote, RemoteNoteFilter, RemoteNotebook};

pub trait NoteStoreApi {
    fn list_notebooks(&self, token: &str) -> Result<Vec<RemoteNotebook>, ApiError>;

    fn get_notebook(&self, token: &str, guid: &Guid) -> Result<RemoteNotebook, ApiError>;

    fn create_notebook(&self, token: &str, notebook: &RemoteNotebook) -> Result<RemoteNotebook, ApiError>;

    /// Returns the update sequence number assigned by the remote.
    fn update_notebook(&self, token: &str, notebook: &RemoteNotebook) -> Result<i32, ApiError>;

    fn create_note(&self, token: &str, note: &RemoteNote) -> Result<RemoteNote, ApiError>;

    fn update_note(&self, token: &str, note: &RemoteNote) -> Result<RemoteNote, ApiError>;

    /// Returns the update sequence number assigned by the remote.
    fn delete_note(&self, token: &str, guid: &Guid) -> Result<i32, ApiError>;

    fn find_notes(
        &self,
        token: &str,
        filter: &RemoteNoteFilter,
        offset: i32,
        max_notes: i32,
    ) -> Result<NoteList, ApiError>;

    fn get_note_content(&self, token: &str, guid: &Guid) -> Result<String, ApiError>;
}

impl<A: NoteStoreApi + ?Sized> NoteStoreApi for Box<A> {
    fn list_notebooks(&self, token: &str) -> Result<Vec<RemoteNotebook>, ApiError> {
        (**self).list_notebooks(token)
    }

    fn get_notebook(&self, token: &str, guid: &Guid) -> Result<RemoteNotebook, ApiError> {
        (**self).get_notebook(token, guid)
    }

    fn create_notebook(&self, token: &str, notebook: &RemoteNotebook) -> Result<RemoteNotebook, ApiError> {
        (**self).create_notebook(token, notebook)
    }

    fn update_notebook(&self, token: &str, notebook: &RemoteNotebook) -> Result<i32, ApiError> {
        (**self).update_notebook(token, notebook)
    }

    fn create_note(&self, token: &str, note: &RemoteNote) -> Result<RemoteNote, ApiError> {
        (**self).create_note(token, note)
    }

    fn update_note(&self, token: &str, note: &RemoteNote) -> Result<RemoteNote, ApiError> {
        (**self).update_note(token, note)
    }

    fn delete_note(&self, token: &str, guid: &Guid) -> Result<i32, ApiError> {
        (**self).delete_note(token, guid)
    }

    fn find_notes(
        &self,
        token: &str,
        filter: &RemoteNoteFilter,
        offset: i32,
        max_notes: i32,
    ) -> Result<NoteList, ApiError> {
        (**self).find_notes(token, filter, offset, max_notes)
    }

    fn get_note_content(&self, token: &str, guid: &Guid) -> Result<String, ApiError> {
        (**self).get_note_content(token, guid)
    }
}
