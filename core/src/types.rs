//! Remote note-store structures as they travel over the wire.
//!
//! # Design
//! The remote store treats every field as optional: a notebook returned by a
//! search may carry only a GUID, and partial updates omit whatever should be
//! left alone. Fields are therefore `Option`s that are skipped when `None`,
//! and the mock server defines its own copies so integration tests catch
//! schema drift.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier the remote store assigns to notebooks and notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(pub String);

impl Guid {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Guid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Guid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteNotebook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<Guid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_notebook: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_sequence_num: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<Guid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_guid: Option<Guid>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
}

impl RemoteNote {
    /// The note's GUID, or an empty string when unset.
    pub fn guid(&self) -> &str {
        self.guid.as_ref().map(Guid::as_str).unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Search criteria understood by the remote `find_notes` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteNoteFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_guid: Option<Guid>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteList {
    #[serde(default)]
    pub start_index: i32,
    #[serde(default)]
    pub total_notes: i32,
    #[serde(default)]
    pub notes: Vec<RemoteNote>,
}

/// Body of a `find_notes` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindNotesRequest {
    pub filter: RemoteNoteFilter,
    pub offset: i32,
    pub max_notes: i32,
}

/// Response of calls that only report the new update sequence number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSequence {
    pub update_sequence_num: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteContent {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted() {
        let nb = RemoteNotebook {
            name: Some("Work".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&nb).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Work"}));
    }

    #[test]
    fn fields_use_camel_case() {
        let note = RemoteNote {
            notebook_guid: Some(Guid::new("nb-1")),
            ..Default::default()
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["notebookGuid"], "nb-1");
    }

    #[test]
    fn getters_fall_back_to_empty() {
        let note = RemoteNote::default();
        assert_eq!(note.guid(), "");
        assert_eq!(note.title(), "");
        assert_eq!(note.content(), "");
    }

    #[test]
    fn note_list_defaults_missing_counters() {
        let list: NoteList = serde_json::from_str(r#"{"notes":[{"title":"a"}]}"#).unwrap();
        assert_eq!(list.start_index, 0);
        assert_eq!(list.notes[0].title(), "a");
    }
}
