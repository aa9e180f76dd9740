//! SQLite schema creation for the link-graph store.

use rusqlite::Connection;

/// Creates the database schema for the graph store.
///
/// Idempotent; calling it on an existing database is safe.
///
/// # Tables Created
/// - `files` - one row per indexed note: path, content hash, scan time
/// - `titles` - ordered titles/aliases per note
/// - `links` - outbound links with their context excerpt and offset
/// - `refs` - external reference keys
/// - `meta` - index-level bookkeeping (last successful scan time)
/// - `schema_version` - schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS files (
            path TEXT PRIMARY KEY,
            hash TEXT NOT NULL,
            scanned_at TEXT NOT NULL
        );",
    )?;

    // pos preserves declaration order; pos 0 is the canonical title
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS titles (
            path TEXT NOT NULL REFERENCES files(path) ON DELETE CASCADE,
            pos INTEGER NOT NULL,
            title TEXT NOT NULL,
            PRIMARY KEY (path, pos)
        );",
    )?;

    // target is deliberately not a foreign key: links may point at notes
    // that do not exist yet
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS links (
            id INTEGER PRIMARY KEY,
            source TEXT NOT NULL REFERENCES files(path) ON DELETE CASCADE,
            target TEXT NOT NULL,
            excerpt TEXT NOT NULL,
            offset INTEGER NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS refs (
            key TEXT PRIMARY KEY,
            path TEXT NOT NULL UNIQUE REFERENCES files(path) ON DELETE CASCADE
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_links_target ON links(target);
         CREATE INDEX IF NOT EXISTS idx_links_source ON links(source);
         CREATE INDEX IF NOT EXISTS idx_titles_path ON titles(path);",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (1, datetime('now'))",
        [],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
