//! SQL schema for the snip SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS snippets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    category    TEXT NOT NULL,   -- subject name at creation time
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL    -- RFC 3339 UTC; store-assigned
);

-- Subject names are unique case-insensitively. There is deliberately no
-- foreign key from snippets.category: subjects are deletable without
-- cascading, and orphaned categories are a supported state.
CREATE TABLE IF NOT EXISTS subjects (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE COLLATE NOCASE
);

CREATE INDEX IF NOT EXISTS snippets_category_idx ON snippets(category);
CREATE INDEX IF NOT EXISTS snippets_created_idx  ON snippets(created_at);

PRAGMA user_version = 1;
";
