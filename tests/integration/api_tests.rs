//! API integration tests, driven in-process through the router

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use bookshelf_server::{api, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    api::router(AppState::new())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Payload years must fall in [1900, current year], so the HTTP fixture
/// uses a modern printing.
fn moby_dick() -> Value {
    json!({
        "name": "Moby Dick",
        "year": 1967,
        "author": "Melville",
        "summary": "...",
        "publisher": "P",
        "pageCount": 200,
        "readPage": 200,
        "reading": false
    })
}

async fn create(app: &Router, book: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"].as_str().expect("No book id").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    create(&app, moby_dick()).await;
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["books"], 1);
}

#[tokio::test]
async fn test_book_lifecycle() {
    // The 1851 edition of this scenario runs against the store directly in
    // repository::books::tests::test_moby_dick_lifecycle: the payload check
    // rejects years before 1900.
    let app = app();

    let (status, body) = send(&app, Method::POST, "/books", Some(moby_dick())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book added successfully");
    let id = body["data"]["bookId"].as_str().expect("No book id").to_string();
    assert_eq!(id.len(), 16);

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let book = &body["data"]["book"];
    assert_eq!(book["name"], "Moby Dick");
    assert_eq!(book["pageCount"], 200);
    assert_eq!(book["finished"], true);
    assert_eq!(book["insertedAt"], book["updatedAt"]);

    let mut edited = moby_dick();
    edited["readPage"] = json!(100);
    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(edited)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book updated successfully");

    // finished is recomputed on edit
    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["readPage"], 100);
    assert_eq!(body["data"]["book"]["finished"], false);

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted successfully");

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_create_rejects_read_page_above_page_count() {
    let app = app();
    let mut book = moby_dick();
    book["readPage"] = json!(201);

    let (status, body) = send(&app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Failed to add book. readPage must not be greater than pageCount"
    );

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_create_rejects_missing_name() {
    let app = app();
    let mut book = moby_dick();
    if let Some(fields) = book.as_object_mut() {
        fields.remove("name");
    }

    let (status, body) = send(&app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to add book. Please provide the book name");
}

#[tokio::test]
async fn test_create_rejects_empty_text_fields() {
    let app = app();
    let mut book = moby_dick();
    book["name"] = json!("");
    book["author"] = json!("");
    book["publisher"] = json!("");

    let (status, body) = send(&app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Failed to add book. Please provide the book name; author must not be empty; publisher must not be empty"
    );

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_update_rejects_empty_name() {
    let app = app();
    let id = create(&app, moby_dick()).await;

    let mut blank = moby_dick();
    blank["name"] = json!("");
    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to update book. Please provide the book name");

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["name"], "Moby Dick");
}

#[tokio::test]
async fn test_malformed_body_uses_fail_envelope() {
    let app = app();
    let mut book = moby_dick();
    book["pageCount"] = json!(-1);

    let (status, body) = send(&app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_update_and_delete_unknown_id() {
    let app = app();

    let (status, body) = send(&app, Method::PUT, "/books/unknown", Some(moby_dick())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to update book. Id not found");

    // a bad payload is reported before the missing id
    let mut bad = moby_dick();
    bad["readPage"] = json!(500);
    let (status, _) = send(&app, Method::PUT, "/books/unknown", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::DELETE, "/books/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to delete book. Id not found");
}

#[tokio::test]
async fn test_list_filters() {
    let app = app();

    let mut harry = moby_dick();
    harry["name"] = json!("Harry Potter");
    harry["reading"] = json!(true);
    harry["readPage"] = json!(10);
    let harry_id = create(&app, harry).await;
    let moby_id = create(&app, moby_dick()).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let books = body["data"]["books"].as_array().expect("books array").clone();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["id"], harry_id.as_str());
    assert_eq!(books[1]["id"], moby_id.as_str());
    // projection only
    assert!(books[0].get("year").is_none());
    assert_eq!(books[0]["publisher"], "P");

    let (_, body) = send(&app, Method::GET, "/books?name=hArRy", None).await;
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["books"][0]["name"], "Harry Potter");

    let (_, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(body["data"]["books"][0]["id"], harry_id.as_str());

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(body["data"]["books"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["books"][0]["id"], moby_id.as_str());

    // only the last criterion applies
    let (_, body) = send(&app, Method::GET, "/books?name=harry&finished=1", None).await;
    assert_eq!(body["data"]["books"][0]["id"], moby_id.as_str());
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"].is_object());
}
