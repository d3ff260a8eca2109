//! The application's own view of notebooks and notes.
//!
//! Empty strings stand in for "not set" throughout; conversions from the
//! remote structures flatten absent fields to empty values.

use crate::types::{Guid, RemoteNote, RemoteNotebook};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    pub guid: String,
    pub name: String,
    /// Stack the notebook is grouped under, empty when ungrouped.
    pub stack: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub guid: String,
    pub title: String,
    pub body: String,
    pub notebook: Option<Notebook>,
}

/// Search criteria. Empty fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub words: String,
    pub notebook_guid: String,
}

impl From<&RemoteNotebook> for Notebook {
    fn from(remote: &RemoteNotebook) -> Self {
        Self {
            guid: remote.guid.as_ref().map(|g| g.0.clone()).unwrap_or_default(),
            name: remote.name.clone().unwrap_or_default(),
            stack: remote.stack.clone().unwrap_or_default(),
        }
    }
}

impl From<&RemoteNote> for Note {
    fn from(remote: &RemoteNote) -> Self {
        Self {
            guid: remote.guid().to_string(),
            title: remote.title().to_string(),
            body: remote.content().to_string(),
            notebook: remote.notebook_guid.as_ref().map(|g| Notebook {
                guid: g.0.clone(),
                ..Default::default()
            }),
        }
    }
}

/// `Some(value)` unless `value` is empty.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn non_empty_guid(value: &str) -> Option<Guid> {
    non_empty(value).map(Guid)
}
