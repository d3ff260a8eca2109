//! In-memory stand-in for the remote note store.
//!
//! Speaks the same JSON-over-HTTP API the core crate's client targets. The
//! wire types are defined here independently so integration tests catch
//! schema drift between the two crates.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_NOTEBOOK_NAME: &str = "Default";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub guid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub default_notebook: bool,
    pub update_sequence_num: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub guid: String,
    pub title: String,
    pub content: String,
    pub notebook_guid: String,
    pub created: i64,
    pub updated: i64,
}

/// Body of notebook create and update calls. Absent fields are left alone
/// on update; a present empty `stack` removes the notebook from its stack,
/// and `defaultNotebook: false` clears the default flag.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookInput {
    pub guid: Option<String>,
    pub name: Option<String>,
    pub stack: Option<String>,
    pub default_notebook: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub notebook_guid: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFilter {
    pub words: Option<String>,
    pub notebook_guid: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub filter: NoteFilter,
    #[serde(default)]
    pub offset: i32,
    #[serde(default = "default_max_notes")]
    pub max_notes: i32,
}

fn default_max_notes() -> i32 {
    100
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteList {
    pub start_index: i32,
    pub total_notes: i32,
    pub notes: Vec<Note>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSequence {
    pub update_sequence_num: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteContent {
    pub content: String,
}

#[derive(Debug, Default)]
pub struct Store {
    notebooks: Vec<Notebook>,
    notes: Vec<Note>,
    usn: i32,
}

impl Store {
    fn next_usn(&mut self) -> i32 {
        self.usn += 1;
        self.usn
    }

    fn notebook_exists(&self, guid: &str) -> bool {
        self.notebooks.iter().any(|nb| nb.guid == guid)
    }

    /// GUID of the default notebook, creating one if the account has none.
    fn default_notebook_guid(&mut self) -> String {
        if let Some(nb) = self.notebooks.iter().find(|nb| nb.default_notebook) {
            return nb.guid.clone();
        }
        let usn = self.next_usn();
        let nb = Notebook {
            guid: Uuid::new_v4().to_string(),
            name: DEFAULT_NOTEBOOK_NAME.to_string(),
            stack: None,
            default_notebook: true,
            update_sequence_num: usn,
        };
        let guid = nb.guid.clone();
        self.notebooks.push(nb);
        guid
    }

    fn make_default(&mut self, guid: &str) {
        for nb in &mut self.notebooks {
            nb.default_notebook = nb.guid == guid;
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
    token: Option<Arc<str>>,
}

type ApiResult<T> = Result<T, (StatusCode, String)>;

fn bad_request(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg.into())
}

fn not_found(kind: &str, guid: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{kind} {guid} not found"))
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Router accepting any non-empty bearer token.
pub fn app() -> Router {
    app_with_token(None)
}

/// Router that only accepts `token` when one is given.
pub fn app_with_token(token: Option<String>) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store::default())),
        token: token.map(Arc::from),
    };
    Router::new()
        .route("/notebooks", get(list_notebooks).post(create_notebook))
        .route("/notebooks/{guid}", get(get_notebook).put(update_notebook))
        .route("/notes", post(create_note))
        .route("/notes/search", post(find_notes))
        .route("/notes/{guid}", put(update_note).delete(delete_note))
        .route("/notes/{guid}/content", get(get_note_content))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: Option<String>) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, restricted = token.is_some(), "mock notestore listening");
    }
    axum::serve(listener, app_with_token(token)).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    match (presented, state.token.as_deref()) {
        (None, _) => {
            warn!("request without token");
            StatusCode::UNAUTHORIZED.into_response()
        }
        (Some(t), Some(expected)) if t != expected => {
            warn!("request with wrong token");
            StatusCode::UNAUTHORIZED.into_response()
        }
        _ => next.run(request).await,
    }
}

async fn list_notebooks(State(state): State<AppState>) -> Json<Vec<Notebook>> {
    Json(state.store.read().await.notebooks.clone())
}

async fn get_notebook(State(state): State<AppState>, Path(guid): Path<String>) -> ApiResult<Json<Notebook>> {
    let store = state.store.read().await;
    store
        .notebooks
        .iter()
        .find(|nb| nb.guid == guid)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("notebook", &guid))
}

async fn create_notebook(
    State(state): State<AppState>,
    Json(input): Json<NotebookInput>,
) -> ApiResult<(StatusCode, Json<Notebook>)> {
    let name = non_empty(input.name).ok_or_else(|| bad_request("notebook name is required"))?;
    let mut store = state.store.write().await;
    if store.notebooks.iter().any(|nb| nb.name.eq_ignore_ascii_case(&name)) {
        return Err((StatusCode::CONFLICT, format!("notebook {name} already exists")));
    }
    let usn = store.next_usn();
    let nb = Notebook {
        guid: Uuid::new_v4().to_string(),
        name,
        stack: non_empty(input.stack),
        default_notebook: false,
        update_sequence_num: usn,
    };
    let guid = nb.guid.clone();
    store.notebooks.push(nb);
    if input.default_notebook.unwrap_or(false) {
        store.make_default(&guid);
    }
    debug!(%guid, "created notebook");
    let created = store.notebooks.last().cloned().ok_or_else(|| not_found("notebook", &guid))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_notebook(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(input): Json<NotebookInput>,
) -> ApiResult<Json<UpdateSequence>> {
    let mut store = state.store.write().await;
    if !store.notebook_exists(&guid) {
        return Err(not_found("notebook", &guid));
    }
    if let Some(name) = &input.name {
        if name.is_empty() {
            return Err(bad_request("notebook name must not be empty"));
        }
        if store
            .notebooks
            .iter()
            .any(|nb| nb.guid != guid && nb.name.eq_ignore_ascii_case(name))
        {
            return Err((StatusCode::CONFLICT, format!("notebook {name} already exists")));
        }
    }
    let usn = store.next_usn();
    if input.default_notebook == Some(true) {
        store.make_default(&guid);
    }
    let nb = store
        .notebooks
        .iter_mut()
        .find(|nb| nb.guid == guid)
        .ok_or_else(|| not_found("notebook", &guid))?;
    if input.default_notebook == Some(false) {
        nb.default_notebook = false;
    }
    if let Some(name) = input.name {
        nb.name = name;
    }
    if let Some(stack) = input.stack {
        nb.stack = non_empty(Some(stack));
    }
    nb.update_sequence_num = usn;
    debug!(%guid, usn, "updated notebook");
    Ok(Json(UpdateSequence {
        update_sequence_num: usn,
    }))
}

async fn create_note(
    State(state): State<AppState>,
    Json(input): Json<NoteInput>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let title = non_empty(input.title).ok_or_else(|| bad_request("note title is required"))?;
    let mut store = state.store.write().await;
    let notebook_guid = match non_empty(input.notebook_guid) {
        Some(guid) if store.notebook_exists(&guid) => guid,
        Some(guid) => return Err(bad_request(format!("unknown notebook {guid}"))),
        None => store.default_notebook_guid(),
    };
    let now = now_millis();
    let note = Note {
        guid: Uuid::new_v4().to_string(),
        title,
        content: input.content.unwrap_or_default(),
        notebook_guid,
        created: now,
        updated: now,
    };
    store.next_usn();
    store.notes.push(note.clone());
    debug!(guid = %note.guid, "created note");
    Ok((StatusCode::CREATED, Json(note)))
}

async fn update_note(
    State(state): State<AppState>,
    Path(guid): Path<String>,
    Json(input): Json<NoteInput>,
) -> ApiResult<Json<Note>> {
    let mut store = state.store.write().await;
    if let Some(nb) = non_empty(input.notebook_guid.clone()) {
        if !store.notebook_exists(&nb) {
            return Err(bad_request(format!("unknown notebook {nb}")));
        }
    }
    if input.title.as_deref() == Some("") {
        return Err(bad_request("note title must not be empty"));
    }
    let idx = store
        .notes
        .iter()
        .position(|n| n.guid == guid)
        .ok_or_else(|| not_found("note", &guid))?;
    store.next_usn();
    let note = &mut store.notes[idx];
    if let Some(title) = input.title {
        note.title = title;
    }
    if let Some(content) = input.content {
        note.content = content;
    }
    if let Some(nb) = non_empty(input.notebook_guid) {
        note.notebook_guid = nb;
    }
    note.updated = now_millis();
    Ok(Json(note.clone()))
}

async fn delete_note(State(state): State<AppState>, Path(guid): Path<String>) -> ApiResult<Json<UpdateSequence>> {
    let mut store = state.store.write().await;
    let idx = store
        .notes
        .iter()
        .position(|n| n.guid == guid)
        .ok_or_else(|| not_found("note", &guid))?;
    store.notes.remove(idx);
    let usn = store.next_usn();
    debug!(%guid, usn, "deleted note");
    Ok(Json(UpdateSequence {
        update_sequence_num: usn,
    }))
}

async fn find_notes(State(state): State<AppState>, Json(req): Json<SearchRequest>) -> ApiResult<Json<NoteList>> {
    if req.offset < 0 {
        return Err(bad_request("offset must not be negative"));
    }
    let words = non_empty(req.filter.words).map(|w| w.to_lowercase());
    let notebook = non_empty(req.filter.notebook_guid);
    let store = state.store.read().await;
    let matching: Vec<&Note> = store
        .notes
        .iter()
        .filter(|n| notebook.as_deref().is_none_or(|nb| n.notebook_guid == nb))
        .filter(|n| {
            words.as_deref().is_none_or(|w| {
                n.title.to_lowercase().contains(w) || n.content.to_lowercase().contains(w)
            })
        })
        .collect();
    let notes = matching
        .iter()
        .skip(req.offset as usize)
        .take(req.max_notes.max(0) as usize)
        .map(|n| (*n).clone())
        .collect();
    Ok(Json(NoteList {
        start_index: req.offset,
        total_notes: matching.len() as i32,
        notes,
    }))
}

async fn get_note_content(State(state): State<AppState>, Path(guid): Path<String>) -> ApiResult<Json<NoteContent>> {
    let store = state.store.read().await;
    store
        .notes
        .iter()
        .find(|n| n.guid == guid)
        .map(|n| {
            Json(NoteContent {
                content: n.content.clone(),
            })
        })
        .ok_or_else(|| not_found("note", &guid))
}
