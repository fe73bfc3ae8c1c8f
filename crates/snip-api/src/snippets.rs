//! Handlers for `/snippets` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/snippets` | All snippets, newest first |
//! | `GET`  | `/snippets/by-subject/:name` | Ids of snippets filed under `name` |
//! | `POST` | `/snippets` | Body: `{"title","category","content"}` |
//! | `GET`  | `/snippets/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use snip_core::{
  snippet::{NewSnippet, Snippet},
  store::SnippetStore,
  validate,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /snippets`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Snippet>>, ApiError>
where
  S: SnippetStore,
{
  let snippets = store.list_snippets().await.map_err(ApiError::store)?;
  Ok(Json(snippets))
}

// ─── List by subject ──────────────────────────────────────────────────────────

/// Wire shape of the `by-subject` listing items.
#[derive(Debug, Serialize)]
pub struct SnippetRef {
  pub id: i64,
}

/// `GET /snippets/by-subject/:name` — exact (case-sensitive) category match.
/// Supports clients that pre-check before attempting a subject delete.
pub async fn list_by_subject<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<SnippetRef>>, ApiError>
where
  S: SnippetStore,
{
  let ids = store
    .list_snippet_ids_by_subject(&name)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(ids.into_iter().map(|id| SnippetRef { id }).collect()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /snippets`.
///
/// Fields are optional at the serde layer so that an absent field and an
/// empty one produce the same 400, rather than a deserialisation reject.
#[derive(Debug, Deserialize)]
pub struct CreateSnippetBody {
  pub title:    Option<String>,
  pub category: Option<String>,
  pub content:  Option<String>,
}

/// `POST /snippets` — 201 + the stored record, including the store-assigned
/// `id` and `created_at` (echoed exactly as persisted).
///
/// Validation runs before any store call; a rejected body inserts nothing.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateSnippetBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SnippetStore,
{
  let input = NewSnippet {
    title:    body.title.unwrap_or_default(),
    category: body.category.unwrap_or_default(),
    content:  body.content.unwrap_or_default(),
  };
  validate::validate_new_snippet(&input)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let snippet = store.add_snippet(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(snippet)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /snippets/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Snippet>, ApiError>
where
  S: SnippetStore,
{
  let snippet = store
    .get_snippet(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("snippet {id} not found")))?;
  Ok(Json(snippet))
}
