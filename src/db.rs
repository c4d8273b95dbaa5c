use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::parser::record::Publication;

pub const DB_PATH: &str = "data/publications.sqlite";

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS publications (
            identifier        TEXT PRIMARY KEY,
            institution       TEXT NOT NULL,
            type              TEXT NOT NULL,
            date              TEXT,
            title             TEXT NOT NULL,
            description       TEXT NOT NULL,
            documents         TEXT NOT NULL,
            contact           TEXT NOT NULL,
            feedback_days     INTEGER NOT NULL,
            max_feedback_date TEXT,
            saved_at          TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_publications_type ON publications(type);
        CREATE INDEX IF NOT EXISTS idx_publications_date ON publications(date);
        ",
    )?;
    Ok(())
}

// ── Upsert ──

/// Save publications keyed by identifier. A repeated identifier replaces the
/// earlier row, so re-crawling a page is harmless.
pub fn upsert_publications(conn: &Connection, rows: &[Publication]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO publications
             (identifier, institution, type, date, title, description,
              documents, contact, feedback_days, max_feedback_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for p in rows {
            let documents = serde_json::to_string(&p.documents)?;
            let contact = serde_json::to_string(&p.contact)?;
            count += stmt.execute(rusqlite::params![
                p.identifier,
                p.institution,
                p.publication_type.as_str(),
                p.date.map(|d| d.to_string()),
                p.title,
                p.description,
                documents,
                contact,
                p.feedback_days,
                p.max_feedback_date.map(|d| d.to_string()),
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

// ── Overview ──

pub struct OverviewRow {
    pub identifier: String,
    pub publication_type: String,
    pub date: Option<String>,
    pub title: String,
    pub feedback_days: u32,
    pub max_feedback_date: Option<String>,
    pub document_count: usize,
}

pub fn fetch_overview(
    conn: &Connection,
    publication_type: Option<&str>,
    limit: usize,
) -> Result<Vec<OverviewRow>> {
    let where_clause = if publication_type.is_some() {
        " WHERE type = ?1"
    } else {
        ""
    };
    let sql = format!(
        "SELECT identifier, type, date, title, feedback_days, max_feedback_date,
                json_array_length(documents)
         FROM publications{}
         ORDER BY date IS NULL, date DESC, identifier
         LIMIT {}",
        where_clause, limit
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = match publication_type {
        Some(t) => stmt.query_map([t], overview_row)?.collect::<Result<Vec<_>, _>>()?,
        None => stmt.query_map([], overview_row)?.collect::<Result<Vec<_>, _>>()?,
    };
    Ok(rows)
}

fn overview_row(row: &rusqlite::Row) -> rusqlite::Result<OverviewRow> {
    Ok(OverviewRow {
        identifier: row.get(0)?,
        publication_type: row.get(1)?,
        date: row.get(2)?,
        title: row.get(3)?,
        feedback_days: row.get(4)?,
        max_feedback_date: row.get(5)?,
        document_count: row.get(6)?,
    })
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub dated: usize,
    pub closed: usize,
    pub by_type: Vec<(String, usize)>,
}

/// `closed` counts publications whose feedback deadline is before `today`.
pub fn get_stats(conn: &Connection, today: NaiveDate) -> Result<Stats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM publications", [], |r| r.get(0))?;
    let dated: usize = conn.query_row(
        "SELECT COUNT(*) FROM publications WHERE date IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let closed: usize = conn.query_row(
        "SELECT COUNT(*) FROM publications WHERE max_feedback_date < ?1",
        [today.to_string()],
        |r| r.get(0),
    )?;

    let mut stmt = conn.prepare(
        "SELECT type, COUNT(*) FROM publications GROUP BY type ORDER BY COUNT(*) DESC, type",
    )?;
    let by_type = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Stats {
        total,
        dated,
        closed,
        by_type,
    })
}
