//! Subject — a named grouping category for snippets.

use serde::{Deserialize, Serialize};

/// Placeholder subjects seeded into an empty store on first initialisation.
pub const DEFAULT_SUBJECTS: [&str; 5] = ["sub1", "sub2", "sub3", "sub4", "sub5"];

/// A named bucket that snippets reference by name.
///
/// Names are unique under ASCII-case-insensitive comparison ("Math" and
/// "math" are the same subject). Everything that follows the
/// `Snippet::category` reference — the delete guard, client grouping —
/// matches byte-for-byte instead; see [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub id:   i64,
  pub name: String,
}
