//! Handlers for `/subjects` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/subjects` | All subjects, name order |
//! | `POST`   | `/subjects` | Body: `{"name":"..."}`; 409 on duplicate |
//! | `DELETE` | `/subjects/:id` | 409 while snippets still reference it |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use snip_core::{
  store::{AddSubjectOutcome, DeleteSubjectOutcome, SnippetStore},
  subject::Subject,
  validate,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subjects`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Subject>>, ApiError>
where
  S: SnippetStore,
{
  let subjects = store.list_subjects().await.map_err(ApiError::store)?;
  Ok(Json(subjects))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /subjects`.
#[derive(Debug, Deserialize)]
pub struct CreateSubjectBody {
  pub name: Option<String>,
}

/// `POST /subjects` — trims the name, then inserts unless a subject with
/// the same name (case-insensitively) already exists.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateSubjectBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SnippetStore,
{
  let name = body
    .name
    .as_deref()
    .and_then(validate::normalize_subject_name)
    .ok_or_else(|| ApiError::BadRequest("subject name is required".to_owned()))?;

  match store.add_subject(&name).await.map_err(ApiError::store)? {
    AddSubjectOutcome::Created(subject) => Ok((StatusCode::CREATED, Json(subject))),
    AddSubjectOutcome::DuplicateName => Err(ApiError::Conflict(format!(
      "a subject named {name:?} already exists"
    ))),
  }
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// Confirmation body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
  pub message: String,
}

/// `DELETE /subjects/:id` — refused with 409 while any snippet still
/// references the subject's name; the message carries the blocking count.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<DeleteConfirmation>, ApiError>
where
  S: SnippetStore,
{
  match store.delete_subject(id).await.map_err(ApiError::store)? {
    DeleteSubjectOutcome::Deleted { name } => Ok(Json(DeleteConfirmation {
      message: format!("subject {name:?} deleted"),
    })),
    DeleteSubjectOutcome::NotFound => {
      Err(ApiError::NotFound(format!("subject {id} not found")))
    }
    DeleteSubjectOutcome::InUse { name, snippet_count } => {
      Err(ApiError::Conflict(format!(
        "cannot delete subject {name:?}: {snippet_count} associated snippet(s) still reference it"
      )))
    }
  }
}
