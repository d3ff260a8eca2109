//! Executing `HttpRequest`s and the HTTP-backed `NoteStoreApi`.
//!
//! # Design
//! `Transport` is the only place that performs I/O. `UreqTransport` turns
//! off ureq's status-as-error behavior so 4xx/5xx responses come back as
//! data and `NoteStoreClient::parse_*` decides what they mean. Only
//! connection-level failures become `ApiError::Transport`.

use tracing::debug;
use ureq::typestate::WithBody;

use crate::api::NoteStoreApi;
use crate::client::NoteStoreClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Guid, NoteList, RemoteNote, RemoteNoteFilter, RemoteNotebook};

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        debug!(method = method.as_str(), %path, "sending request");

        let result = match method {
            HttpMethod::Get => with_headers(self.agent.get(&path), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&path), &headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(&path), &headers), body.as_deref()),
            HttpMethod::Put => send(with_headers(self.agent.put(&path), &headers), body.as_deref()),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, "received response");

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: ureq::RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

/// `NoteStoreApi` over HTTP: build, execute, parse.
#[derive(Debug, Clone)]
pub struct RemoteNoteStore<T = UreqTransport> {
    client: NoteStoreClient,
    transport: T,
}

impl RemoteNoteStore<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> RemoteNoteStore<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: NoteStoreClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &NoteStoreClient {
        &self.client
    }
}

impl<T: Transport> NoteStoreApi for RemoteNoteStore<T> {
    fn list_notebooks(&self, token: &str) -> Result<Vec<RemoteNotebook>, ApiError> {
        let req = self.client.build_list_notebooks(token);
        self.client.parse_list_notebooks(self.transport.execute(req)?)
    }

    fn get_notebook(&self, token: &str, guid: &Guid) -> Result<RemoteNotebook, ApiError> {
        let req = self.client.build_get_notebook(token, guid);
        self.client.parse_get_notebook(self.transport.execute(req)?)
    }

    fn create_notebook(&self, token: &str, notebook: &RemoteNotebook) -> Result<RemoteNotebook, ApiError> {
        let req = self.client.build_create_notebook(token, notebook)?;
        self.client.parse_create_notebook(self.transport.execute(req)?)
    }

    fn update_notebook(&self, token: &str, notebook: &RemoteNotebook) -> Result<i32, ApiError> {
        let req = self.client.build_update_notebook(token, notebook)?;
        self.client.parse_update_notebook(self.transport.execute(req)?)
    }

    fn create_note(&self, token: &str, note: &RemoteNote) -> Result<RemoteNote, ApiError> {
        let req = self.client.build_create_note(token, note)?;
        self.client.parse_create_note(self.transport.execute(req)?)
    }

    fn update_note(&self, token: &str, note: &RemoteNote) -> Result<RemoteNote, ApiError> {
        let req = self.client.build_update_note(token, note)?;
        self.client.parse_update_note(self.transport.execute(req)?)
    }

    fn delete_note(&self, token: &str, guid: &Guid) -> Result<i32, ApiError> {
        let req = self.client.build_delete_note(token, guid);
        self.client.parse_delete_note(self.transport.execute(req)?)
    }

    fn find_notes(
        &self,
        token: &str,
        filter: &RemoteNoteFilter,
        offset: i32,
        max_notes: i32,
    ) -> Result<NoteList, ApiError> {
        let req = self.client.build_find_notes(token, filter, offset, max_notes)?;
        self.client.parse_find_notes(self.transport.execute(req)?)
    }

    fn get_note_content(&self, token: &str, guid: &Guid) -> Result<String, ApiError> {
        let req = self.client.build_get_note_content(token, guid);
        self.client.parse_get_note_content(self.transport.execute(req)?)
    }
}
