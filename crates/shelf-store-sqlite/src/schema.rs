//! SQL schema for the Shelf SQLite store.
//!
//! Executed once at connection startup. Everything is re-derivable from the
//! content host, so there are no migrations: `PRAGMA user_version` only
//! records which layout created the file.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Documents are never deleted; removal clears is_active.
CREATE TABLE IF NOT EXISTS documents (
    id          INTEGER PRIMARY KEY,
    path        TEXT NOT NULL UNIQUE,
    title       TEXT NOT NULL,
    category    TEXT NOT NULL,
    subcategory TEXT,
    folders     TEXT NOT NULL DEFAULT '[]',  -- JSON array of segments
    content     TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    sha         TEXT NOT NULL,               -- host identity token
    is_active   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL,               -- ISO 8601 UTC
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS documents_category_idx ON documents(category);
CREATE INDEX IF NOT EXISTS documents_updated_idx  ON documents(updated_at);

-- Full-text index over documents, kept in step by triggers.
CREATE VIRTUAL TABLE IF NOT EXISTS documents_fts USING fts5(
    title, content, description,
    content = 'documents',
    content_rowid = 'id'
);

CREATE TRIGGER IF NOT EXISTS documents_fts_ai AFTER INSERT ON documents BEGIN
    INSERT INTO documents_fts(rowid, title, content, description)
    VALUES (new.id, new.title, new.content, new.description);
END;

CREATE TRIGGER IF NOT EXISTS documents_fts_ad AFTER DELETE ON documents BEGIN
    INSERT INTO documents_fts(documents_fts, rowid, title, content, description)
    VALUES ('delete', old.id, old.title, old.content, old.description);
END;

CREATE TRIGGER IF NOT EXISTS documents_fts_au AFTER UPDATE ON documents BEGIN
    INSERT INTO documents_fts(documents_fts, rowid, title, content, description)
    VALUES ('delete', old.id, old.title, old.content, old.description);
    INSERT INTO documents_fts(rowid, title, content, description)
    VALUES (new.id, new.title, new.content, new.description);
END;

-- Rebuilt wholesale at the end of every sync run.
CREATE TABLE IF NOT EXISTS categories (
    name       TEXT PRIMARY KEY,
    slug       TEXT NOT NULL UNIQUE,
    icon       TEXT,
    post_count INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS folders (
    path       TEXT PRIMARY KEY,
    readme     TEXT,
    sha        TEXT,
    updated_at TEXT NOT NULL
);

-- Append-only audit log.
CREATE TABLE IF NOT EXISTS sync_runs (
    run_id    TEXT PRIMARY KEY,
    status    TEXT NOT NULL,   -- 'success' | 'failed'
    added     INTEGER NOT NULL DEFAULT 0,
    updated   INTEGER NOT NULL DEFAULT 0,
    deleted   INTEGER NOT NULL DEFAULT 0,
    error     TEXT,
    synced_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS sync_runs_synced_idx ON sync_runs(synced_at);

PRAGMA user_version = 1;
";
