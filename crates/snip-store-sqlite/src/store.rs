//! [`SqliteStore`] — the SQLite implementation of [`SnippetStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use snip_core::{
  snippet::{NewSnippet, Snippet},
  store::{AddSubjectOutcome, DeleteSubjectOutcome, SnippetStore},
  subject::{DEFAULT_SUBJECTS, Subject},
};

use crate::{
  Error, Result,
  encode::{RawSnippet, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A snippet store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, run schema initialisation, and
  /// seed the default subjects if the table is empty.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init().await?;
    Ok(store)
  }

  /// Apply the schema, then insert [`DEFAULT_SUBJECTS`] iff the subjects
  /// table is empty. One linear sequence on the connection thread; the seed
  /// never runs twice for the same file.
  async fn init(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;

        let count: i64 =
          conn.query_row("SELECT COUNT(*) FROM subjects", [], |r| r.get(0))?;
        if count == 0 {
          let tx = conn.transaction()?;
          {
            let mut stmt = tx.prepare("INSERT INTO subjects (name) VALUES (?1)")?;
            for name in DEFAULT_SUBJECTS {
              stmt.execute(rusqlite::params![name])?;
            }
          }
          tx.commit()?;
        }
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SnippetStore impl ───────────────────────────────────────────────────────

impl SnippetStore for SqliteStore {
  type Error = Error;

  // ── Snippets ──────────────────────────────────────────────────────────────

  async fn list_snippets(&self) -> Result<Vec<Snippet>> {
    let raws: Vec<RawSnippet> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, category, content, created_at
           FROM snippets
           ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawSnippet {
              id:         row.get(0)?,
              title:      row.get(1)?,
              category:   row.get(2)?,
              content:    row.get(3)?,
              created_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSnippet::into_snippet).collect()
  }

  async fn list_snippet_ids_by_subject(&self, name: &str) -> Result<Vec<i64>> {
    // The category column carries BINARY collation, so `=` here is the
    // exact byte comparison the delete guard relies on.
    let name = name.to_owned();

    let ids = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT id FROM snippets WHERE category = ?1 ORDER BY id")?;
        let rows = stmt
          .query_map(rusqlite::params![name], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(ids)
  }

  async fn add_snippet(&self, input: NewSnippet) -> Result<Snippet> {
    // One timestamp: the value persisted is the value echoed back.
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);
    let NewSnippet { title, category, content } = input;

    let (id, title, category, content) = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO snippets (title, category, content, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![title, category, content, at_str],
        )?;
        Ok((conn.last_insert_rowid(), title, category, content))
      })
      .await?;

    Ok(Snippet { id, title, category, content, created_at })
  }

  async fn get_snippet(&self, id: i64) -> Result<Option<Snippet>> {
    let raw: Option<RawSnippet> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, title, category, content, created_at
               FROM snippets WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawSnippet {
                  id:         row.get(0)?,
                  title:      row.get(1)?,
                  category:   row.get(2)?,
                  content:    row.get(3)?,
                  created_at: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSnippet::into_snippet).transpose()
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let subjects = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM subjects ORDER BY name ASC")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Subject { id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(subjects)
  }

  async fn add_subject(&self, name: &str) -> Result<AddSubjectOutcome> {
    let name = name.to_owned();

    let outcome = self
      .conn
      .call(move |conn| {
        // The UNIQUE COLLATE NOCASE constraint is the duplicate check, so
        // detection and insert cannot race.
        match conn
          .execute("INSERT INTO subjects (name) VALUES (?1)", rusqlite::params![name])
        {
          Ok(_) => Ok(AddSubjectOutcome::Created(Subject {
            id: conn.last_insert_rowid(),
            name,
          })),
          Err(e) if is_unique_violation(&e) => Ok(AddSubjectOutcome::DuplicateName),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    Ok(outcome)
  }

  async fn delete_subject(&self, id: i64) -> Result<DeleteSubjectOutcome> {
    let outcome = self
      .conn
      .call(move |conn| {
        // The reference check must not race with a concurrent snippet
        // insert, so the check and the delete share one transaction.
        let tx = conn.transaction()?;

        let name: Option<String> = tx
          .query_row(
            "SELECT name FROM subjects WHERE id = ?1",
            rusqlite::params![id],
            |r| r.get(0),
          )
          .optional()?;
        let Some(name) = name else {
          return Ok(DeleteSubjectOutcome::NotFound);
        };

        let snippet_count: i64 = tx.query_row(
          "SELECT COUNT(*) FROM snippets WHERE category = ?1",
          rusqlite::params![name],
          |r| r.get(0),
        )?;
        if snippet_count > 0 {
          return Ok(DeleteSubjectOutcome::InUse {
            name,
            snippet_count: snippet_count as usize,
          });
        }

        tx.execute("DELETE FROM subjects WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(DeleteSubjectOutcome::Deleted { name })
      })
      .await?;

    Ok(outcome)
  }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.code == rusqlite::ErrorCode::ConstraintViolation
  )
}
