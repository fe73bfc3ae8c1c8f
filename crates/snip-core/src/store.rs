//! The `SnippetStore` trait and typed operation outcomes.
//!
//! The trait is implemented by storage backends (e.g. `snip-store-sqlite`).
//! Higher layers (`snip-api`, the `snipd` binary) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  snippet::{NewSnippet, Snippet},
  subject::Subject,
};

// ─── Operation outcomes ──────────────────────────────────────────────────────

/// Result of [`SnippetStore::add_subject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddSubjectOutcome {
  Created(Subject),
  /// A subject with this name (case-insensitively) already exists.
  DuplicateName,
}

/// Result of [`SnippetStore::delete_subject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteSubjectOutcome {
  Deleted { name: String },
  NotFound,
  /// Deletion refused: snippets still reference the subject by name.
  InUse { name: String, snippet_count: usize },
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a snippet store backend.
///
/// Snippets are append-only: they are inserted and read, never updated or
/// deleted. Subjects are inserted and deleted whole-row. Each operation is a
/// single round trip to the backend; the two compound subject operations
/// (create, delete) are atomic within the backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SnippetStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Snippets ──────────────────────────────────────────────────────────

  /// All snippets, newest first (`created_at` descending, `id` descending
  /// as the tie-break). Unbounded.
  fn list_snippets(
    &self,
  ) -> impl Future<Output = Result<Vec<Snippet>, Self::Error>> + Send + '_;

  /// Ids of the snippets whose category equals `name` exactly
  /// (case-sensitive byte comparison).
  fn list_snippet_ids_by_subject<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send + 'a;

  /// Insert a snippet. The store assigns `id` and `created_at`; the
  /// returned record carries exactly the values that were persisted.
  fn add_snippet(
    &self,
    input: NewSnippet,
  ) -> impl Future<Output = Result<Snippet, Self::Error>> + Send + '_;

  /// Retrieve a snippet by id. Returns `None` if not found.
  fn get_snippet(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Snippet>, Self::Error>> + Send + '_;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// All subjects, ordered by name ascending.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Insert a subject. `name` must already be trimmed and non-empty; the
  /// case-insensitive duplicate check is atomic with the insert.
  fn add_subject<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<AddSubjectOutcome, Self::Error>> + Send + 'a;

  /// Delete a subject by id, unless snippets still reference its name.
  /// The reference check and the delete run in one transaction.
  fn delete_subject(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<DeleteSubjectOutcome, Self::Error>> + Send + '_;
}
