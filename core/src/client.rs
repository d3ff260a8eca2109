//! Stateless HTTP request builder and response parser for the remote note
//! store.
//!
//! # Design
//! `NoteStoreClient` holds only a `base_url`. Each remote operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`; `RemoteNoteStore` in
//! `transport.rs` glues them together around an actual round-trip.

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    FindNotesRequest, Guid, NoteContent, NoteList, RemoteNote, RemoteNoteFilter, RemoteNotebook,
    UpdateSequence,
};

/// Everything but RFC 3986 unreserved characters is escaped in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

fn segment(guid: &str) -> PercentEncode<'_> {
    utf8_percent_encode(guid, SEGMENT)
}

#[derive(Debug, Clone)]
pub struct NoteStoreClient {
    base_url: String,
}

impl NoteStoreClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_notebooks(&self, token: &str) -> HttpRequest {
        self.request(HttpMethod::Get, "/notebooks".to_string(), token)
    }

    pub fn build_get_notebook(&self, token: &str, guid: &Guid) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/notebooks/{}", segment(guid.as_str())), token)
    }

    pub fn build_create_notebook(
        &self,
        token: &str,
        notebook: &RemoteNotebook,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/notebooks".to_string(), token, notebook)
    }

    /// The notebook's GUID selects the resource; a notebook without one
    /// targets `/notebooks/` and is rejected by the server.
    pub fn build_update_notebook(
        &self,
        token: &str,
        notebook: &RemoteNotebook,
    ) -> Result<HttpRequest, ApiError> {
        let guid = notebook.guid.as_ref().map(Guid::as_str).unwrap_or_default();
        self.json_request(HttpMethod::Put, format!("/notebooks/{}", segment(guid)), token, notebook)
    }

    pub fn build_create_note(&self, token: &str, note: &RemoteNote) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/notes".to_string(), token, note)
    }

    pub fn build_update_note(&self, token: &str, note: &RemoteNote) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, format!("/notes/{}", segment(note.guid())), token, note)
    }

    pub fn build_delete_note(&self, token: &str, guid: &Guid) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/notes/{}", segment(guid.as_str())), token)
    }

    pub fn build_find_notes(
        &self,
        token: &str,
        filter: &RemoteNoteFilter,
        offset: i32,
        max_notes: i32,
    ) -> Result<HttpRequest, ApiError> {
        let body = FindNotesRequest {
            filter: filter.clone(),
            offset,
            max_notes,
        };
        self.json_request(HttpMethod::Post, "/notes/search".to_string(), token, &body)
    }

    pub fn build_get_note_content(&self, token: &str, guid: &Guid) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/notes/{}/content", segment(guid.as_str())), token)
    }

    pub fn parse_list_notebooks(&self, response: HttpResponse) -> Result<Vec<RemoteNotebook>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_notebook(&self, response: HttpResponse) -> Result<RemoteNotebook, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_notebook(&self, response: HttpResponse) -> Result<RemoteNotebook, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_notebook(&self, response: HttpResponse) -> Result<i32, ApiError> {
        let usn: UpdateSequence = parse_json(response, 200)?;
        Ok(usn.update_sequence_num)
    }

    pub fn parse_create_note(&self, response: HttpResponse) -> Result<RemoteNote, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_note(&self, response: HttpResponse) -> Result<RemoteNote, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_note(&self, response: HttpResponse) -> Result<i32, ApiError> {
        let usn: UpdateSequence = parse_json(response, 200)?;
        Ok(usn.update_sequence_num)
    }

    pub fn parse_find_notes(&self, response: HttpResponse) -> Result<NoteList, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_note_content(&self, response: HttpResponse) -> Result<String, ApiError> {
        let content: NoteContent = parse_json(response, 200)?;
        Ok(content.content)
    }

    fn request(&self, method: HttpMethod, path: String, token: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("authorization".to_string(), format!("Bearer {token}"))],
            body: None,
        }
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        token: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(method, path, token);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        s if s == expected => Ok(()),
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
