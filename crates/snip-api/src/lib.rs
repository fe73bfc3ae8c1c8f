//! JSON REST API for snip.
//!
//! Exposes an axum [`Router`] backed by any [`snip_core::store::SnippetStore`].
//! Transport concerns (bind address, request tracing, TLS) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", snip_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod snippets;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use snip_core::store::SnippetStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SnippetStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Snippets
    .route("/snippets", get(snippets::list::<S>).post(snippets::create::<S>))
    .route("/snippets/by-subject/{name}", get(snippets::list_by_subject::<S>))
    .route("/snippets/{id}", get(snippets::get_one::<S>))
    // Subjects
    .route("/subjects", get(subjects::list::<S>).post(subjects::create::<S>))
    .route("/subjects/{id}", delete(subjects::delete_one::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use snip_core::subject::DEFAULT_SUBJECTS;
  use snip_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };

    let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn create_subject(app: &Router, name: &str) -> (StatusCode, Value) {
    send(app.clone(), "POST", "/subjects", Some(json!({ "name": name }))).await
  }

  async fn create_snippet(
    app: &Router,
    title: &str,
    category: &str,
    content: &str,
  ) -> (StatusCode, Value) {
    send(
      app.clone(),
      "POST",
      "/snippets",
      Some(json!({ "title": title, "category": category, "content": content })),
    )
    .await
  }

  // ── First run ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn fresh_store_serves_seeded_subjects_and_no_snippets() {
    let app = app().await;

    let (status, subjects) = send(app.clone(), "GET", "/subjects", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = subjects
      .as_array()
      .unwrap()
      .iter()
      .map(|s| s["name"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(names, DEFAULT_SUBJECTS);

    let (status, snippets) = send(app, "GET", "/snippets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snippets, json!([]));
  }

  // ── Snippets ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_snippet_roundtrip_echoes_stored_timestamp() {
    let app = app().await;

    let (status, created) =
      create_snippet(&app, "hello", "sub1", "fn main() {}").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_i64().unwrap() > 0);
    assert!(created["created_at"].is_string());

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) =
      send(app, "GET", &format!("/snippets/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "hello");
    assert_eq!(fetched["category"], "sub1");
    assert_eq!(fetched["content"], "fn main() {}");
    // The POST echo and the stored row serialise to the same instant.
    assert_eq!(fetched["created_at"], created["created_at"]);
  }

  #[tokio::test]
  async fn create_snippet_rejects_missing_fields_without_inserting() {
    let app = app().await;

    let bad_bodies = [
      json!({ "title": "", "category": "sub1", "content": "x" }),
      json!({ "title": "hi", "category": "", "content": "x" }),
      json!({ "title": "hi", "category": "sub1", "content": "" }),
      json!({ "category": "sub1", "content": "x" }),
      json!({}),
    ];
    for body in bad_bodies {
      let (status, resp) = send(app.clone(), "POST", "/snippets", Some(body)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "body: {resp}");
      assert!(resp["error"].is_string());
    }

    // Fail fast means no partial writes: the table is still empty.
    let (_, snippets) = send(app, "GET", "/snippets", None).await;
    assert_eq!(snippets, json!([]));
  }

  #[tokio::test]
  async fn get_snippet_unknown_returns_404() {
    let app = app().await;
    let (status, resp) = send(app, "GET", "/snippets/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(resp["error"].as_str().unwrap().contains("42"));
  }

  #[tokio::test]
  async fn snippets_list_newest_first() {
    let app = app().await;

    create_snippet(&app, "older", "sub1", "a").await;
    create_snippet(&app, "newer", "sub2", "b").await;

    let (_, snippets) = send(app, "GET", "/snippets", None).await;
    let titles: Vec<_> = snippets
      .as_array()
      .unwrap()
      .iter()
      .map(|s| s["title"].as_str().unwrap())
      .collect();
    assert_eq!(titles, vec!["newer", "older"]);
  }

  #[tokio::test]
  async fn by_subject_listing_matches_exact_names_only() {
    let app = app().await;

    let (_, created) = create_snippet(&app, "a", "Rust", "x").await;
    create_snippet(&app, "b", "rust", "x").await;

    let (status, refs) =
      send(app.clone(), "GET", "/snippets/by-subject/Rust", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refs, json!([{ "id": created["id"] }]));

    let (status, refs) = send(app, "GET", "/snippets/by-subject/Go", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refs, json!([]));
  }

  // ── Subjects ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_subject_rejects_case_insensitive_duplicates() {
    let app = app().await;

    let (status, created) = create_subject(&app, "Math").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Math");

    for dup in ["math", "MATH", "Math"] {
      let (status, resp) = create_subject(&app, dup).await;
      assert_eq!(status, StatusCode::CONFLICT, "name: {dup}");
      assert!(resp["error"].is_string());
    }

    let (_, subjects) = send(app, "GET", "/subjects", None).await;
    let math_rows = subjects
      .as_array()
      .unwrap()
      .iter()
      .filter(|s| s["name"].as_str().unwrap().eq_ignore_ascii_case("math"))
      .count();
    assert_eq!(math_rows, 1);
  }

  #[tokio::test]
  async fn create_subject_trims_name() {
    let app = app().await;
    let (status, created) = create_subject(&app, "  Go  ").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Go");
  }

  #[tokio::test]
  async fn create_subject_requires_a_name() {
    let app = app().await;

    let (status, _) = send(app.clone(), "POST", "/subjects", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = create_subject(&app, "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn delete_subject_lifecycle() {
    let app = app().await;

    let (_, created) = create_subject(&app, "Temp").await;
    let id = created["id"].as_i64().unwrap();

    let (status, resp) =
      send(app.clone(), "DELETE", &format!("/subjects/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(resp["message"].as_str().unwrap().contains("Temp"));

    let (_, subjects) = send(app.clone(), "GET", "/subjects", None).await;
    assert!(
      subjects
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["name"] != "Temp")
    );

    let (status, _) =
      send(app, "DELETE", &format!("/subjects/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── End to end ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn subject_with_snippets_cannot_be_deleted() {
    let app = app().await;

    let (status, subject) = create_subject(&app, "Rust").await;
    assert_eq!(status, StatusCode::CREATED);
    let subject_id = subject["id"].as_i64().unwrap();

    let (status, snippet) =
      create_snippet(&app, "hi", "Rust", "fn main() {}").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(snippet["id"].as_i64().unwrap() > 0);
    assert!(snippet["created_at"].is_string());

    // Most recent snippet comes back first.
    let (_, snippets) = send(app.clone(), "GET", "/snippets", None).await;
    assert_eq!(snippets[0]["title"], "hi");

    let (status, resp) =
      send(app.clone(), "DELETE", &format!("/subjects/{subject_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(
      resp["error"].as_str().unwrap().contains("1 associated"),
      "error: {resp}"
    );

    // The refused delete leaves the subject in place.
    let (_, subjects) = send(app, "GET", "/subjects", None).await;
    assert!(
      subjects
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s["name"] == "Rust")
    );
  }
}
