use std::fs;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use super::{ClipRepository, SortKey, migrate::migrate};
use crate::clip::{self, Clip, ClipId, format_stored, parse_stored};
use crate::error::{ClipError, Result};

const COLUMNS: &str = "id, title, content, is_active, created_at, updated_at, last_used_at";

/// Clip storage in a single SQLite file.
pub struct SqliteClipRepository {
    conn: Connection,
}

impl SqliteClipRepository {
    /// Opens (creating if needed) the database at `path` and brings its schema up to date.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ClipError::Storage(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        debug!(path = %path.display(), "opening clip database");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrate(&conn)?;
        Ok(Self { conn })
    }
}

fn read_time(row: &Row<'_>, idx: usize) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    let raw: Option<String> = row.get(idx)?;
    raw.as_deref().and_then(parse_stored).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unreadable timestamp {raw:?}").into(),
        )
    })
}

fn clip_from_row(row: &Row<'_>) -> rusqlite::Result<Clip> {
    Ok(Clip {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        is_active: row.get::<_, Option<bool>>(3)?.unwrap_or(true),
        created_at: read_time(row, 4)?,
        updated_at: read_time(row, 5)?,
        last_used_at: read_time(row, 6)?,
    })
}

impl ClipRepository for SqliteClipRepository {
    fn find_by_id(&self, id: ClipId) -> Result<Clip> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM clips WHERE id = ?1"),
                [id],
                clip_from_row,
            )
            .optional()?
            .ok_or(ClipError::NotFound { id })
    }

    fn create(&mut self, clip: &Clip) -> Result<ClipId> {
        self.conn.execute(
            "INSERT INTO clips (title, content, is_active, created_at, updated_at, last_used_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                clip.title,
                clip.content,
                clip.is_active,
                format_stored(&clip.created_at),
                format_stored(&clip.updated_at),
                format_stored(&clip.last_used_at),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "inserted clip");
        Ok(id)
    }

    fn update(&mut self, clip: &Clip) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE clips
             SET title = ?2, content = ?3, is_active = ?4,
                 created_at = ?5, updated_at = ?6, last_used_at = ?7
             WHERE id = ?1",
            params![
                clip.id,
                clip.title,
                clip.content,
                clip.is_active,
                format_stored(&clip.created_at),
                format_stored(&clip.updated_at),
                format_stored(&clip.last_used_at),
            ],
        )?;
        if changed == 0 {
            return Err(ClipError::NotFound { id: clip.id });
        }
        Ok(())
    }

    fn delete(&mut self, clip: &Clip) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM clips WHERE id = ?1", [clip.id])?;
        if changed == 0 {
            return Err(ClipError::NotFound { id: clip.id });
        }
        debug!(id = clip.id, "deleted clip");
        Ok(())
    }

    fn list_by_status(&self, is_active: bool, order_key: &str) -> Result<Vec<Clip>> {
        let order = match SortKey::parse(order_key) {
            Some(sort) => sort.order_by(),
            None => {
                debug!(order_key, "unrecognized sort key; listing unordered");
                String::new()
            }
        };
        let sql = format!("SELECT {COLUMNS} FROM clips WHERE is_active = ?1 {order}");
        let mut stmt = self.conn.prepare(&sql)?;
        let clips = stmt
            .query_map([is_active], clip_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(clips)
    }

    fn duplicate(&mut self, id: ClipId) -> Result<ClipId> {
        let source = self.find_by_id(id)?;
        self.create(&source.duplicated(clip::now()))
    }
}
