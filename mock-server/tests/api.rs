use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_notestore::{app, app_with_token, Note, NoteContent, NoteList, Notebook, UpdateSequence};
use tower::{Service, ServiceExt};

const TOKEN: &str = "Bearer test-token";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, TOKEN)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

/// Send one request through a router that keeps its state between calls.
async fn send(app: &mut Router, req: Request<String>) -> axum::response::Response {
    ServiceExt::<Request<String>>::ready(app).await.unwrap().call(req).await.unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/notebooks").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_token_returns_401() {
    let resp = app_with_token(Some("other-token".to_string()))
        .oneshot(request("GET", "/notebooks"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn matching_token_is_accepted() {
    let resp = app_with_token(Some("test-token".to_string()))
        .oneshot(request("GET", "/notebooks"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- notebooks ---

#[tokio::test]
async fn list_notebooks_empty() {
    let resp = app().oneshot(request("GET", "/notebooks")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let books: Vec<Notebook> = body_json(resp).await;
    assert!(books.is_empty());
}

#[tokio::test]
async fn create_notebook_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/notebooks",
            r#"{"name":"Work","stack":"Office","defaultNotebook":true}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let nb: Notebook = body_json(resp).await;
    assert_eq!(nb.name, "Work");
    assert_eq!(nb.stack.as_deref(), Some("Office"));
    assert!(nb.default_notebook);
    assert!(!nb.guid.is_empty());
}

#[tokio::test]
async fn create_notebook_without_name_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/notebooks", r#"{"stack":"Office"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_notebook_name_returns_409() {
    let mut app = app();
    let resp = send(&mut app, json_request("POST", "/notebooks", r#"{"name":"Work"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(&mut app, json_request("POST", "/notebooks", r#"{"name":"work"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn get_notebook_not_found() {
    let resp = app().oneshot(request("GET", "/notebooks/missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_notebook_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/notebooks/missing", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_notebook_bumps_usn() {
    let mut app = app();
    let resp = send(&mut app, json_request("POST", "/notebooks", r#"{"name":"Old","stack":"S"}"#)).await;
    let created: Notebook = body_json(resp).await;

    let resp = send(
        &mut app,
        json_request("PUT", &format!("/notebooks/{}", created.guid), r#"{"name":"New"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let usn: UpdateSequence = body_json(resp).await;
    assert!(usn.update_sequence_num > created.update_sequence_num);

    let resp = send(&mut app, request("GET", &format!("/notebooks/{}", created.guid))).await;
    let fetched: Notebook = body_json(resp).await;
    assert_eq!(fetched.name, "New");
    assert_eq!(fetched.stack.as_deref(), Some("S")); // unchanged
    assert_eq!(fetched.update_sequence_num, usn.update_sequence_num);
}

#[tokio::test]
async fn update_notebook_clears_default_flag() {
    let mut app = app();
    let resp = send(
        &mut app,
        json_request("POST", "/notebooks", r#"{"name":"Inbox","defaultNotebook":true}"#),
    )
    .await;
    let created: Notebook = body_json(resp).await;
    assert!(created.default_notebook);

    let resp = send(
        &mut app,
        json_request("PUT", &format!("/notebooks/{}", created.guid), r#"{"defaultNotebook":false}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&mut app, request("GET", &format!("/notebooks/{}", created.guid))).await;
    let fetched: Notebook = body_json(resp).await;
    assert!(!fetched.default_notebook);
    assert_eq!(fetched.name, "Inbox"); // unchanged
}

// --- notes ---

#[tokio::test]
async fn create_note_without_title_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/notes", r#"{"content":"body"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_note_in_unknown_notebook_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/notes",
            r#"{"title":"t","notebookGuid":"missing"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_note_without_notebook_uses_default() {
    let mut app = app();
    let resp = send(&mut app, json_request("POST", "/notes", r#"{"title":"Loose"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let note: Note = body_json(resp).await;

    let resp = send(&mut app, request("GET", "/notebooks")).await;
    let books: Vec<Notebook> = body_json(resp).await;
    assert_eq!(books.len(), 1);
    assert!(books[0].default_notebook);
    assert_eq!(books[0].guid, note.notebook_guid);
}

#[tokio::test]
async fn delete_note_not_found() {
    let resp = app().oneshot(request("DELETE", "/notes/missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_missing_note_leaves_usn_alone() {
    let mut app = app();
    let resp = send(&mut app, json_request("POST", "/notebooks", r#"{"name":"First"}"#)).await;
    let first: Notebook = body_json(resp).await;

    let resp = send(&mut app, json_request("PUT", "/notes/missing", r#"{"title":"t"}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&mut app, json_request("POST", "/notebooks", r#"{"name":"Second"}"#)).await;
    let second: Notebook = body_json(resp).await;
    assert_eq!(second.update_sequence_num, first.update_sequence_num + 1);
}

#[tokio::test]
async fn search_rejects_negative_offset() {
    let resp = app()
        .oneshot(json_request("POST", "/notes/search", r#"{"offset":-1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full lifecycle ---

#[tokio::test]
async fn note_lifecycle() {
    let mut app = app();

    let resp = send(&mut app, json_request("POST", "/notebooks", r#"{"name":"Recipes"}"#)).await;
    let book: Notebook = body_json(resp).await;

    // create two notes in the notebook and one elsewhere
    let body = format!(
        r#"{{"title":"Pancakes","content":"Flour and eggs","notebookGuid":"{}"}}"#,
        book.guid
    );
    let resp = send(&mut app, json_request("POST", "/notes", &body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let pancakes: Note = body_json(resp).await;
    assert_eq!(pancakes.notebook_guid, book.guid);

    let body = format!(
        r#"{{"title":"Omelette","content":"Eggs","notebookGuid":"{}"}}"#,
        book.guid
    );
    send(&mut app, json_request("POST", "/notes", &body)).await;
    send(&mut app, json_request("POST", "/notes", r#"{"title":"Groceries","content":"eggs, milk"}"#)).await;

    // search by words across notebooks, case-insensitive
    let resp = send(
        &mut app,
        json_request("POST", "/notes/search", r#"{"filter":{"words":"EGGS"},"offset":0,"maxNotes":10}"#),
    )
    .await;
    let list: NoteList = body_json(resp).await;
    assert_eq!(list.total_notes, 3);

    // restrict to one notebook and page
    let body = format!(
        r#"{{"filter":{{"notebookGuid":"{}"}},"offset":1,"maxNotes":10}}"#,
        book.guid
    );
    let resp = send(&mut app, json_request("POST", "/notes/search", &body)).await;
    let list: NoteList = body_json(resp).await;
    assert_eq!(list.total_notes, 2);
    assert_eq!(list.start_index, 1);
    assert_eq!(list.notes.len(), 1);
    assert_eq!(list.notes[0].title, "Omelette");

    // partial update keeps content
    let resp = send(
        &mut app,
        json_request("PUT", &format!("/notes/{}", pancakes.guid), r#"{"title":"Crepes"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Note = body_json(resp).await;
    assert_eq!(updated.title, "Crepes");
    assert_eq!(updated.content, "Flour and eggs");

    // content
    let resp = send(&mut app, request("GET", &format!("/notes/{}/content", pancakes.guid))).await;
    let content: NoteContent = body_json(resp).await;
    assert_eq!(content.content, "Flour and eggs");

    // delete
    let resp = send(&mut app, request("DELETE", &format!("/notes/{}", pancakes.guid))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let usn: UpdateSequence = body_json(resp).await;
    assert!(usn.update_sequence_num > 0);

    // gone
    let resp = send(&mut app, request("GET", &format!("/notes/{}/content", pancakes.guid))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!body_bytes(resp).await.is_empty());
}
