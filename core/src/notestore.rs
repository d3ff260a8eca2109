//! The adapter between the internal note model and the remote note store.
//!
//! # Design
//! `Notestore` translates `Notebook`/`Note`/`NoteFilter` field by field into
//! the remote structures, validates what the remote would reject anyway,
//! and hands everything else to a `NoteStoreApi`. Remote failures come back
//! unchanged as `Error::Api`.
//!
//! Optional remote fields are only populated when the internal value is
//! non-empty. For notes in particular this means an update with an empty
//! body leaves the stored content untouched.

use tracing::{debug, instrument};

use crate::api::NoteStoreApi;
use crate::cache::NotebookCache;
use crate::config::NoteStoreConfig;
use crate::error::{Error, Result};
use crate::model::{non_empty, non_empty_guid, Note, NoteFilter, Notebook};
use crate::transport::RemoteNoteStore;
use crate::types::{Guid, RemoteNote, RemoteNoteFilter, RemoteNotebook};

pub struct Notestore<A> {
    api: A,
    token: String,
    cache: NotebookCache,
}

impl Notestore<RemoteNoteStore> {
    /// A notestore talking HTTP to `config.base_url`.
    pub fn from_config(config: &NoteStoreConfig) -> Self {
        Self::new(RemoteNoteStore::new(&config.base_url), config.auth_token.clone())
    }
}

impl<A: NoteStoreApi> Notestore<A> {
    pub fn new(api: A, token: impl Into<String>) -> Self {
        Self {
            api,
            token: token.into(),
            cache: NotebookCache::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &NotebookCache {
        &self.cache
    }

    /// Every notebook in the account, in the order the remote lists them.
    #[instrument(skip(self))]
    pub fn get_all_notebooks(&self) -> Result<Vec<Notebook>> {
        let remote = self.api.list_notebooks(&self.token)?;
        debug!(count = remote.len(), "listed notebooks");
        let books = remote.iter().map(Notebook::from).collect();
        for nb in remote {
            self.cache.insert(nb);
        }
        Ok(books)
    }

    #[instrument(skip(self))]
    pub fn get_notebook(&self, guid: &str) -> Result<Notebook> {
        let remote = self.api.get_notebook(&self.token, &Guid::from(guid))?;
        let book = Notebook::from(&remote);
        self.cache.insert(remote);
        Ok(book)
    }

    /// Create `notebook` remotely. An empty stack is left unset.
    #[instrument(skip(self, notebook), fields(name = %notebook.name))]
    pub fn create_notebook(&self, notebook: &Notebook, default_notebook: bool) -> Result<Notebook> {
        let request = RemoteNotebook {
            name: Some(notebook.name.clone()),
            stack: non_empty(&notebook.stack),
            default_notebook: Some(default_notebook),
            ..Default::default()
        };
        let created = self.api.create_notebook(&self.token, &request)?;
        debug!(guid = ?created.guid, "created notebook");
        let book = Notebook::from(&created);
        self.cache.insert(created);
        Ok(book)
    }

    /// Rename (and optionally restack) a notebook previously returned by
    /// this notestore. Fails without contacting the remote when the
    /// notebook isn't cached.
    #[instrument(skip(self, notebook), fields(guid = %notebook.guid))]
    pub fn update_notebook(&self, notebook: &Notebook) -> Result<()> {
        let mut remote = self.cache.get(&notebook.guid)?;
        remote.name = Some(notebook.name.clone());
        if !notebook.stack.is_empty() {
            remote.stack = Some(notebook.stack.clone());
        }
        let usn = self.api.update_notebook(&self.token, &remote)?;
        debug!(usn, "updated notebook");
        remote.update_sequence_num = Some(usn);
        self.cache.insert(remote);
        Ok(())
    }

    #[instrument(skip(self, note), fields(title = %note.title))]
    pub fn create_note(&self, note: &Note) -> Result<Note> {
        let request = RemoteNote {
            title: Some(note.title.clone()),
            content: Some(note.body.clone()),
            notebook_guid: notebook_guid(note),
            ..Default::default()
        };
        let created = self.api.create_note(&self.token, &request)?;
        debug!(guid = created.guid(), "created note");
        Ok(Note::from(&created))
    }

    /// Update title and, when non-empty, body of an existing note.
    #[instrument(skip(self, note), fields(guid = %note.guid))]
    pub fn update_note(&self, note: &Note) -> Result<()> {
        if note.guid.is_empty() {
            return Err(Error::NoGuidSet);
        }
        if note.title.is_empty() {
            return Err(Error::NoTitleSet);
        }
        let request = RemoteNote {
            guid: Some(Guid::from(note.guid.as_str())),
            title: Some(note.title.clone()),
            content: non_empty(&note.body),
            notebook_guid: notebook_guid(note),
            ..Default::default()
        };
        self.api.update_note(&self.token, &request)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn delete_note(&self, guid: &str) -> Result<()> {
        let usn = self.api.delete_note(&self.token, &Guid::from(guid))?;
        debug!(usn, "deleted note");
        Ok(())
    }

    /// Notes matching `filter`, starting at `offset`, at most `max_notes`.
    #[instrument(skip(self))]
    pub fn find_notes(&self, filter: &NoteFilter, offset: i32, max_notes: i32) -> Result<Vec<Note>> {
        let remote_filter = RemoteNoteFilter {
            words: non_empty(&filter.words),
            notebook_guid: non_empty_guid(&filter.notebook_guid),
        };
        let list = self
            .api
            .find_notes(&self.token, &remote_filter, offset, max_notes)?;
        debug!(
            returned = list.notes.len(),
            total = list.total_notes,
            "found notes"
        );
        Ok(list.notes.iter().map(Note::from).collect())
    }

    #[instrument(skip(self))]
    pub fn get_note_content(&self, guid: &str) -> Result<String> {
        Ok(self.api.get_note_content(&self.token, &Guid::from(guid))?)
    }
}

fn notebook_guid(note: &Note) -> Option<Guid> {
    note.notebook
        .as_ref()
        .and_then(|nb| non_empty_guid(&nb.guid))
}
