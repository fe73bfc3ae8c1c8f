//! Input validation and the snippet/subject matching rules.
//!
//! Two comparison rules coexist on purpose and are kept strictly separate:
//!
//! - subject-name *uniqueness* is ASCII-case-insensitive, matching the
//!   `UNIQUE ... COLLATE NOCASE` constraint the store enforces;
//! - everything that follows the `Snippet::category` soft reference (the
//!   delete guard, client grouping) matches byte-for-byte, so a category of
//!   `"rust"` does not block deleting the subject `"Rust"`.

use crate::{
  Error, Result,
  snippet::{NewSnippet, Snippet},
};

/// Check that every snippet field is non-empty.
///
/// Fields are validated as received — snippet content may start or end with
/// whitespace that is significant in code, so nothing is trimmed here.
pub fn validate_new_snippet(input: &NewSnippet) -> Result<()> {
  if input.title.is_empty() {
    return Err(Error::MissingField("title"));
  }
  if input.category.is_empty() {
    return Err(Error::MissingField("category"));
  }
  if input.content.is_empty() {
    return Err(Error::MissingField("content"));
  }
  Ok(())
}

/// Trim a subject name. Returns `None` if nothing is left.
pub fn normalize_subject_name(name: &str) -> Option<String> {
  let trimmed = name.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// ASCII-case-insensitive duplicate check against existing subject names.
///
/// Clients run this before POSTing a new subject; the store's UNIQUE
/// constraint remains the authoritative check.
pub fn is_duplicate_subject<'a>(
  name: &str,
  existing: impl IntoIterator<Item = &'a str>,
) -> bool {
  existing.into_iter().any(|e| e.eq_ignore_ascii_case(name))
}

/// Count the snippets whose category references `name` exactly.
pub fn references_subject(snippets: &[Snippet], name: &str) -> usize {
  snippets.iter().filter(|s| s.category == name).count()
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn snippet(title: &str, category: &str, content: &str) -> NewSnippet {
    NewSnippet {
      title:    title.to_owned(),
      category: category.to_owned(),
      content:  content.to_owned(),
    }
  }

  #[test]
  fn valid_snippet_passes() {
    assert_eq!(validate_new_snippet(&snippet("hi", "Rust", "fn main() {}")), Ok(()));
  }

  #[test]
  fn each_missing_field_is_named() {
    assert_eq!(
      validate_new_snippet(&snippet("", "Rust", "x")),
      Err(Error::MissingField("title"))
    );
    assert_eq!(
      validate_new_snippet(&snippet("hi", "", "x")),
      Err(Error::MissingField("category"))
    );
    assert_eq!(
      validate_new_snippet(&snippet("hi", "Rust", "")),
      Err(Error::MissingField("content"))
    );
  }

  #[test]
  fn snippet_fields_are_not_trimmed() {
    // Whitespace-only content is odd but present, and stays untouched.
    assert_eq!(validate_new_snippet(&snippet(" ", "Rust", "  ")), Ok(()));
  }

  #[test]
  fn subject_name_is_trimmed() {
    assert_eq!(normalize_subject_name("  Math  ").as_deref(), Some("Math"));
    assert_eq!(normalize_subject_name("Math"), Some("Math".to_owned()));
    assert_eq!(normalize_subject_name("   "), None);
    assert_eq!(normalize_subject_name(""), None);
  }

  #[test]
  fn duplicate_check_ignores_ascii_case() {
    let existing = ["Math", "History"];
    assert!(is_duplicate_subject("math", existing));
    assert!(is_duplicate_subject("MATH", existing));
    assert!(is_duplicate_subject("History", existing));
    assert!(!is_duplicate_subject("Math ", existing));
    assert!(!is_duplicate_subject("Chemistry", existing));
  }

  #[test]
  fn reference_count_is_exact_match_only() {
    let stored = |category: &str| Snippet {
      id:         1,
      title:      "t".to_owned(),
      category:   category.to_owned(),
      content:    "c".to_owned(),
      created_at: Utc::now(),
    };
    let snippets = vec![stored("Rust"), stored("rust"), stored("Rust"), stored("Rust ")];

    assert_eq!(references_subject(&snippets, "Rust"), 2);
    assert_eq!(references_subject(&snippets, "rust"), 1);
    assert_eq!(references_subject(&snippets, "Go"), 0);
  }
}
