//! The presentation aggregator: bucket snippets under the subject list.
//!
//! Grouping is a client concern — the server returns flat lists. Buckets
//! follow the subject list's order and are present even when empty; a
//! terminal "Uncategorized" bucket collects every snippet whose category
//! matches no known subject name byte-for-byte (deleted subjects, renamed
//! ones, whitespace mismatches).

use snip_core::{snippet::Snippet, subject::Subject};

/// Display name of the overflow bucket.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One rendered group: a subject name and the snippets filed under it,
/// in server order (newest first).
#[derive(Debug, PartialEq, Eq)]
pub struct Bucket {
  pub name:     String,
  pub snippets: Vec<Snippet>,
}

/// The assembled view over one subjects-then-snippets fetch cycle.
#[derive(Debug, PartialEq, Eq)]
pub enum View {
  /// No subjects exist at all (and nothing to show).
  NoSubjects,
  /// Subjects exist but not a single snippet does.
  NoSnippets,
  Grouped(Vec<Bucket>),
}

/// Bucket `snippets` under `subjects`, preserving subject order.
///
/// Snippets without subjects still render: with an empty subject list and a
/// non-empty snippet list, the view is a single Uncategorized bucket.
pub fn build_view(subjects: &[Subject], snippets: Vec<Snippet>) -> View {
  if snippets.is_empty() {
    return if subjects.is_empty() { View::NoSubjects } else { View::NoSnippets };
  }

  let mut buckets: Vec<Bucket> = subjects
    .iter()
    .map(|s| Bucket { name: s.name.clone(), snippets: Vec::new() })
    .collect();
  let mut uncategorized = Vec::new();

  for snippet in snippets {
    match buckets.iter_mut().find(|b| b.name == snippet.category) {
      Some(bucket) => bucket.snippets.push(snippet),
      None => uncategorized.push(snippet),
    }
  }

  if !uncategorized.is_empty() {
    buckets.push(Bucket { name: UNCATEGORIZED.to_owned(), snippets: uncategorized });
  }

  View::Grouped(buckets)
}
