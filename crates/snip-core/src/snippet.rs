//! Snippet — a stored text record (code, notes, one-off gists) filed under a
//! subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted snippet.
///
/// Snippets are immutable once created: there is no update or delete path.
/// `category` names a [`Subject`](crate::subject::Subject) by value only — a
/// soft reference with no store-level constraint, so a snippet can outlive
/// the subject it was filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
  pub id:         i64,
  pub title:      String,
  /// Subject name at creation time. Never rewritten when subjects change.
  pub category:   String,
  /// Arbitrary text, rendered verbatim by clients.
  pub content:    String,
  /// Store-assigned at insert time; immutable thereafter.
  pub created_at: DateTime<Utc>,
}

/// Input for creating a snippet. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSnippet {
  pub title:    String,
  pub category: String,
  pub content:  String,
}
