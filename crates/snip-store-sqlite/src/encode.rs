//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; every other column is already
//! TEXT or an integer rowid.

use chrono::{DateTime, Utc};
use snip_core::snippet::Snippet;

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `snippets` row.
pub struct RawSnippet {
  pub id:         i64,
  pub title:      String,
  pub category:   String,
  pub content:    String,
  pub created_at: String,
}

impl RawSnippet {
  pub fn into_snippet(self) -> Result<Snippet> {
    Ok(Snippet {
      id:         self.id,
      title:      self.title,
      category:   self.category,
      content:    self.content,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
