//! Schema setup for the clip table.
//! Databases written by older releases lack the status and last-used columns;
//! they are added in place and backfilled so no manual step is needed.
//! Those releases also soft-deleted rows through `deleted_at` and stored
//! timestamps with a local offset; both are normalized here.

use rusqlite::{Connection, params};
use tracing::info;

use crate::clip::{self, ClipId, format_stored, parse_stored};
use crate::error::Result;

const TIME_COLUMNS: [&str; 3] = ["created_at", "updated_at", "last_used_at"];

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS clips (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    last_used_at TEXT
)";

pub(crate) fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TABLE)?;
    let columns = table_columns(conn, "clips")?;

    if columns.iter().any(|c| c == "deleted_at") {
        let purged = conn.execute("DELETE FROM clips WHERE deleted_at IS NOT NULL", [])?;
        if purged > 0 {
            info!(rows = purged, "removed soft-deleted clips");
        }
    }

    if !columns.iter().any(|c| c == "is_active") {
        info!("adding is_active column to clips");
        conn.execute_batch("ALTER TABLE clips ADD COLUMN is_active INTEGER NOT NULL DEFAULT 1")?;
    }
    if !columns.iter().any(|c| c == "last_used_at") {
        info!("adding last_used_at column to clips");
        conn.execute_batch("ALTER TABLE clips ADD COLUMN last_used_at TEXT")?;
    }

    let now = format_stored(&clip::now());
    let backfilled = conn.execute("UPDATE clips SET is_active = 1 WHERE is_active IS NULL", [])?
        + conn.execute(
            "UPDATE clips SET created_at = COALESCE(created_at, updated_at, ?1) WHERE created_at IS NULL",
            [&now],
        )?
        + conn.execute(
            "UPDATE clips SET updated_at = COALESCE(updated_at, created_at) WHERE updated_at IS NULL",
            [],
        )?
        + conn.execute(
            "UPDATE clips SET last_used_at = COALESCE(updated_at, created_at, ?1) WHERE last_used_at IS NULL",
            [&now],
        )?;
    if backfilled > 0 {
        info!(rows = backfilled, "backfilled clip columns");
    }

    let rewritten = normalize_timestamps(conn)?;
    if rewritten > 0 {
        info!(values = rewritten, "rewrote timestamps to the stored format");
    }
    Ok(())
}

/// Rewrites every parseable timestamp that is not already in the stored
/// format, so `ORDER BY` on the text columns follows time order.
fn normalize_timestamps(conn: &Connection) -> Result<usize> {
    let rows = {
        let mut stmt = conn.prepare("SELECT id, created_at, updated_at, last_used_at FROM clips")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, ClipId>(0)?,
                    [
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ],
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows
    };

    let tx = conn.unchecked_transaction()?;
    let mut rewritten = 0;
    for (id, values) in rows {
        for (column, raw) in TIME_COLUMNS.iter().zip(values) {
            let Some(raw) = raw else { continue };
            let Some(ts) = parse_stored(&raw) else { continue };
            let stored = format_stored(&ts);
            if stored != raw {
                tx.execute(
                    &format!("UPDATE clips SET {column} = ?1 WHERE id = ?2"),
                    params![stored, id],
                )?;
                rewritten += 1;
            }
        }
    }
    tx.commit()?;
    Ok(rewritten)
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}
