//! Router tests for the sync trigger and route wiring.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::Value;
use shelf_core::{
  noop::NoopStore,
  source::{ContentSource, Listing, RemoteContent, RemoteFile},
  store::DocumentStore,
};
use shelf_store_sqlite::SqliteStore;
use shelf_sync::Synchronizer;
use tower::ServiceExt as _;

use crate::{AppState, ServerConfig, router};

#[derive(Debug, thiserror::Error)]
#[error("no such file: {0}")]
struct Missing(String);

/// Two fixed documents.
struct StaticSource;

impl ContentSource for StaticSource {
  type Error = Missing;

  async fn list_documents(&self) -> Listing {
    Listing {
      files:    vec![
        RemoteFile { name: "intro.md".into(), path: "java/intro.md".into(), sha: "a1".into() },
        RemoteFile { name: "own.md".into(), path: "rust/own.md".into(), sha: "b1".into() },
      ],
      warnings: Vec::new(),
    }
  }

  async fn fetch<'a>(&'a self, path: &'a str) -> Result<RemoteContent, Missing> {
    Ok(RemoteContent {
      path:    path.to_owned(),
      content: format!("Body of {path}"),
      sha:     if path.starts_with("java") { "a1".into() } else { "b1".into() },
    })
  }
}

fn config(secret: Option<&str>) -> ServerConfig {
  ServerConfig { sync_secret: secret.map(str::to_owned), ..ServerConfig::default() }
}

fn app<S: DocumentStore + 'static>(store: S, secret: Option<&str>) -> Router {
  let sync = Synchronizer::new(Arc::new(store), Arc::new(StaticSource));
  router(AppState::new(sync, config(secret)))
}

async fn sqlite() -> SqliteStore { SqliteStore::open_in_memory().await.unwrap() }

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
  let resp = app.oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn post_sync(auth: Option<&str>) -> Request<Body> {
  let mut req = Request::builder().method("POST").uri("/sync");
  if let Some(auth) = auth {
    req = req.header(header::AUTHORIZATION, auth);
  }
  req.body(Body::empty()).unwrap()
}

// ─── /sync ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sync_without_secret_runs() {
  let (status, body) = send(app(sqlite().await, None), post_sync(None)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert_eq!(body["message"], "Sync completed successfully");
  assert_eq!(body["added"], 2);
  assert_eq!(body["updated"], 0);
  assert_eq!(body["deleted"], 0);
  assert_eq!(body["warnings"], serde_json::json!([]));
}

#[tokio::test]
async fn sync_requires_bearer_when_secret_set() {
  let (status, body) = send(app(sqlite().await, Some("s3cret")), post_sync(None)).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["error"], "unauthorized");

  let (status, _) =
    send(app(sqlite().await, Some("s3cret")), post_sync(Some("Bearer wrong"))).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);

  let (status, body) =
    send(app(sqlite().await, Some("s3cret")), post_sync(Some("Bearer s3cret"))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["added"], 2);
}

#[tokio::test]
async fn sync_via_get_is_allowed() {
  let req = Request::builder().uri("/sync").body(Body::empty()).unwrap();
  let (status, body) = send(app(sqlite().await, None), req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
}

#[tokio::test]
async fn sync_without_database_is_unavailable() {
  let (status, body) = send(app(NoopStore, None), post_sync(None)).await;
  assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
  assert_eq!(body["success"], false);
  assert_eq!(body["error"], "database is not configured");
}

#[tokio::test]
async fn synced_documents_are_readable_through_api() {
  let store = Arc::new(sqlite().await);
  let sync = Synchronizer::new(store.clone(), Arc::new(StaticSource));
  let app = router(AppState::new(sync, config(None)));

  send(app.clone(), post_sync(None)).await;

  let req = Request::builder().uri("/api/documents/java/intro.md").body(Body::empty()).unwrap();
  let (status, body) = send(app.clone(), req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["content"], "Body of java/intro.md");

  let req = Request::builder().uri("/api/sync-runs").body(Body::empty()).unwrap();
  let (_, runs) = send(app, req).await;
  assert_eq!(runs[0]["status"], "success");
  assert_eq!(runs[0]["added"], 2);
}

// ─── Misc ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_ok() {
  let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
  let resp = app(NoopStore, None).oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert_eq!(&bytes[..], b"ok");
}

#[test]
fn config_defaults() {
  let cfg = ServerConfig::default();
  assert_eq!(cfg.port, 3000);
  assert_eq!(cfg.github_owner, "jon890");
  assert_eq!(cfg.github_repo, "fos-study");
  assert!(cfg.database_path.is_none());
  assert!(cfg.use_fulltext_search);

  let gh = ServerConfig { github_token: Some(String::new()), ..cfg }.github();
  assert!(gh.token.is_none());
}
