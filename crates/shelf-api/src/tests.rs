//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode},
};
use serde_json::Value;
use shelf_core::{
  document::{NewDocument, NewSyncRun},
  noop::NoopStore,
  store::DocumentStore,
  taxonomy,
};
use shelf_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use crate::api_router;

async fn seeded() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  for (path, content) in [
    ("java/intro.md", "Hello Java"),
    ("java/spring/di.md", "Dependency injection"),
    ("rust/ownership.md", "Borrow checker"),
  ] {
    store
      .insert_document(NewDocument {
        path:        path.into(),
        title:       taxonomy::title_from_filename(taxonomy::file_name(path)),
        taxonomy:    taxonomy::derive(path),
        content:     content.into(),
        description: content.into(),
        sha:         format!("sha-{path}"),
      })
      .await
      .unwrap();
  }
  store.rebuild_categories().await.unwrap();
  store.record_sync_run(NewSyncRun::success(3, 0, 0)).await.unwrap();
  api_router(Arc::new(store), true)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
  let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
  let resp = app.oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn categories_are_listed_by_count() {
  let (status, body) = get(seeded().await, "/categories").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body[0]["name"], "java");
  assert_eq!(body[0]["count"], 2);
  assert_eq!(body[1]["name"], "rust");
}

#[tokio::test]
async fn category_documents() {
  let (status, body) = get(seeded().await, "/categories/java/documents").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 2);
  assert!(body[0].get("content").is_none());
}

#[tokio::test]
async fn document_by_nested_path() {
  let (status, body) = get(seeded().await, "/documents/java/spring/di.md").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["title"], "di");
  assert_eq!(body["subcategory"], "spring");
  assert_eq!(body["content"], "Dependency injection");
}

#[tokio::test]
async fn missing_document_is_404_json() {
  let (status, body) = get(seeded().await, "/documents/java/nope.md").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].as_str().unwrap().contains("java/nope.md"));
}

#[tokio::test]
async fn recent_documents_respects_limit() {
  let (_, body) = get(seeded().await, "/documents?limit=2").await;
  assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn paths_and_folders() {
  let app = seeded().await;
  let (_, paths) = get(app.clone(), "/paths").await;
  assert_eq!(paths.as_array().unwrap().len(), 3);

  let (_, folders) = get(app.clone(), "/folders").await;
  assert_eq!(
    folders,
    serde_json::json!([["java"], ["java", "spring"], ["rust"]])
  );

  let (status, java) = get(app.clone(), "/folders/java").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(java["documents"].as_array().unwrap().len(), 1);
  assert_eq!(java["folders"][0]["name"], "spring");

  let (status, _) = get(app, "/folders/python").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_wraps_results() {
  let app = seeded().await;
  let (status, body) = get(app.clone(), "/search?q=borrow").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["results"].as_array().unwrap().len(), 1);
  assert_eq!(body["results"][0]["path"], "rust/ownership.md");

  let (_, empty) = get(app, "/search").await;
  assert!(empty["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn sync_runs_are_listed() {
  let (_, body) = get(seeded().await, "/sync-runs").await;
  assert_eq!(body[0]["status"], "success");
  assert_eq!(body[0]["added"], 3);
}

#[tokio::test]
async fn unconfigured_store_reads_empty() {
  let app = api_router(Arc::new(NoopStore), true);
  let (status, body) = get(app, "/categories").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, serde_json::json!([]));
}
