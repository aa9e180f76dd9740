//! GraphStore trait implementation for SqliteStore.

use super::SqliteStore;
use crate::domain::NoteLink;
use crate::index::{
    Backlink, Completion, Extraction, GraphStore, LinkRow, StagedNote, StoreError, StoreResult,
};
use crate::infra::{ContentHash, slug_from_path};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key in `meta` stamping the last successful full scan.
const META_LAST_BUILT: &str = "last_built_at";

impl GraphStore for SqliteStore {
    fn upsert_note(
        &mut self,
        path: &Path,
        hash: &ContentHash,
        scanned_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        upsert_file_row(&self.conn, path, hash, scanned_at)?;
        Ok(())
    }

    fn replace_titles(&mut self, path: &Path, titles: &[String]) -> StoreResult<()> {
        let tx = self.transaction()?;
        replace_title_rows(tx.conn(), path, titles)?;
        tx.commit()
    }

    fn replace_links(&mut self, path: &Path, links: &[NoteLink]) -> StoreResult<()> {
        let tx = self.transaction()?;
        replace_link_rows(tx.conn(), path, links)?;
        tx.commit()
    }

    fn replace_ref(&mut self, path: &Path, ref_key: Option<&str>) -> StoreResult<()> {
        let tx = self.transaction()?;
        replace_ref_row(tx.conn(), path, ref_key)?;
        tx.commit()
    }

    fn replace_note(
        &mut self,
        path: &Path,
        hash: &ContentHash,
        scanned_at: DateTime<Utc>,
        extraction: &Extraction,
    ) -> StoreResult<()> {
        let tx = self.transaction()?;
        upsert_file_row(tx.conn(), path, hash, scanned_at)?;
        replace_title_rows(tx.conn(), path, &extraction.titles)?;
        replace_link_rows(tx.conn(), path, &extraction.links)?;
        replace_ref_row(tx.conn(), path, extraction.ref_key.as_deref())?;
        tx.commit()
    }

    fn delete_note(&mut self, path: &Path) -> StoreResult<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM files WHERE path = ?",
            [path_str(path)],
        )?;
        Ok(deleted > 0)
    }

    fn contains_note(&self, path: &Path) -> StoreResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM files WHERE path = ?",
                [path_str(path)],
                |_| Ok(()),
            )
            .map(|_| true);
        match found {
            Ok(v) => Ok(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    fn hash_of(&self, path: &Path) -> StoreResult<Option<ContentHash>> {
        let row = self.conn.query_row(
            "SELECT hash FROM files WHERE path = ?",
            [path_str(path)],
            |row| row.get::<_, String>(0),
        );
        match row {
            Ok(hex) => Ok(Some(parse_hash(&hex)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    fn all_notes(&self) -> StoreResult<HashMap<PathBuf, ContentHash>> {
        let mut stmt = self.conn.prepare("SELECT path, hash FROM files")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut notes = HashMap::new();
        for row in rows {
            let (path, hex) = row?;
            notes.insert(PathBuf::from(path), parse_hash(&hex)?);
        }
        Ok(notes)
    }

    fn titles_of(&self, path: &Path) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title FROM titles WHERE path = ? ORDER BY pos")?;
        let titles = stmt
            .query_map([path_str(path)], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(titles)
    }

    fn all_titles(&self) -> StoreResult<HashMap<PathBuf, Vec<String>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT path, title FROM titles ORDER BY path, pos")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut titles: HashMap<PathBuf, Vec<String>> = HashMap::new();
        for row in rows {
            let (path, title) = row?;
            titles.entry(PathBuf::from(path)).or_default().push(title);
        }
        Ok(titles)
    }

    fn backlinks_to(&self, path: &Path) -> StoreResult<Vec<Backlink>> {
        let mut stmt = self.conn.prepare(
            "SELECT source, excerpt, offset FROM links
             WHERE target = ? ORDER BY source, offset",
        )?;
        let backlinks = stmt
            .query_map([path_str(path)], |row| {
                Ok(Backlink {
                    source: PathBuf::from(row.get::<_, String>(0)?),
                    excerpt: row.get(1)?,
                    offset: row.get::<_, i64>(2)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(backlinks)
    }

    fn links_from(&self, path: &Path) -> StoreResult<Vec<LinkRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT source, target, excerpt, offset FROM links
             WHERE source = ? ORDER BY offset",
        )?;
        let links = stmt
            .query_map([path_str(path)], link_row_from_sql)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }

    fn all_links(&self) -> StoreResult<Vec<LinkRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT source, target, excerpt, offset FROM links ORDER BY source, offset",
        )?;
        let links = stmt
            .query_map([], link_row_from_sql)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }

    fn resolve_key(&self, key: &str) -> StoreResult<Option<PathBuf>> {
        let row = self.conn.query_row(
            "SELECT path FROM refs WHERE key = ?",
            [key],
            |row| row.get::<_, String>(0),
        );
        match row {
            Ok(path) => Ok(Some(PathBuf::from(path))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    fn all_title_completions(&self) -> StoreResult<Vec<Completion>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, path FROM titles ORDER BY title, path")?;
        let mut completions = stmt
            .query_map([], |row| {
                Ok(Completion {
                    label: row.get(0)?,
                    path: PathBuf::from(row.get::<_, String>(1)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        // Untitled notes fall back to a path-derived slug label
        let mut stmt = self.conn.prepare(
            "SELECT path FROM files f
             WHERE NOT EXISTS (SELECT 1 FROM titles t WHERE t.path = f.path)
             ORDER BY path",
        )?;
        let untitled = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        for path in untitled {
            let path = PathBuf::from(path);
            completions.push(Completion {
                label: slug_from_path(&path),
                path,
            });
        }

        Ok(completions)
    }

    fn apply_scan(
        &mut self,
        staged: &[StagedNote],
        deletions: &[PathBuf],
        completed_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let tx = self.transaction()?;

        for path in deletions {
            tx.execute("DELETE FROM files WHERE path = ?", [path_str(path)])?;
        }
        for note in staged {
            upsert_file_row(tx.conn(), &note.path, &note.hash, note.scanned_at)?;
            replace_title_rows(tx.conn(), &note.path, &note.extraction.titles)?;
            replace_link_rows(tx.conn(), &note.path, &note.extraction.links)?;
            replace_ref_row(tx.conn(), &note.path, note.extraction.ref_key.as_deref())?;
        }
        tx.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![META_LAST_BUILT, completed_at.to_rfc3339()],
        )?;

        tx.commit()
    }

    fn last_built_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        let row = self.conn.query_row(
            "SELECT value FROM meta WHERE key = ?",
            [META_LAST_BUILT],
            |row| row.get::<_, String>(0),
        );
        match row {
            Ok(value) => {
                let at = DateTime::parse_from_rfc3339(&value)
                    .map_err(|e| {
                        StoreError::CorruptRow(format!("invalid {META_LAST_BUILT}: {e}"))
                    })?
                    .with_timezone(&Utc);
                Ok(Some(at))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::Database(e)),
        }
    }
}

// ===========================================
// Row Helpers
// ===========================================

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn parse_hash(hex: &str) -> StoreResult<ContentHash> {
    ContentHash::from_hex(hex).map_err(|e| StoreError::CorruptRow(e.to_string()))
}

fn link_row_from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<LinkRow> {
    Ok(LinkRow {
        source: PathBuf::from(row.get::<_, String>(0)?),
        target: PathBuf::from(row.get::<_, String>(1)?),
        excerpt: row.get(2)?,
        offset: row.get::<_, i64>(3)? as usize,
    })
}

fn upsert_file_row(
    conn: &Connection,
    path: &Path,
    hash: &ContentHash,
    scanned_at: DateTime<Utc>,
) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO files (path, hash, scanned_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(path) DO UPDATE SET
             hash = excluded.hash,
             scanned_at = excluded.scanned_at",
        rusqlite::params![path_str(path), hash.as_str(), scanned_at.to_rfc3339()],
    )?;
    Ok(())
}

fn replace_title_rows(conn: &Connection, path: &Path, titles: &[String]) -> StoreResult<()> {
    let path = path_str(path);
    conn.execute("DELETE FROM titles WHERE path = ?", [&path])?;
    for (pos, title) in titles.iter().enumerate() {
        conn.execute(
            "INSERT INTO titles (path, pos, title) VALUES (?1, ?2, ?3)",
            rusqlite::params![path, pos as i64, title],
        )?;
    }
    Ok(())
}

fn replace_link_rows(conn: &Connection, path: &Path, links: &[NoteLink]) -> StoreResult<()> {
    let path = path_str(path);
    conn.execute("DELETE FROM links WHERE source = ?", [&path])?;
    for link in links {
        conn.execute(
            "INSERT INTO links (source, target, excerpt, offset) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                path,
                path_str(&link.target),
                link.context.excerpt,
                link.context.offset as i64
            ],
        )?;
    }
    Ok(())
}

fn replace_ref_row(conn: &Connection, path: &Path, ref_key: Option<&str>) -> StoreResult<()> {
    let path = path_str(path);
    conn.execute("DELETE FROM refs WHERE path = ?", [&path])?;
    if let Some(key) = ref_key {
        // A key stolen from another note moves to the most recent declarer
        conn.execute(
            "INSERT INTO refs (key, path) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET path = excluded.path",
            rusqlite::params![key, path],
        )?;
    }
    Ok(())
}
