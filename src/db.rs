use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::fetch::FetchedPage;

const DB_PATH: &str = "data/pm.sqlite";

pub fn connect() -> Result<Connection> {
    std::fs::create_dir_all("data")?;
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pages (
            id         INTEGER PRIMARY KEY,
            url        TEXT UNIQUE NOT NULL,
            html       TEXT,
            status     INTEGER,
            latency_ms INTEGER,
            fetched_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS pm_records (
            id           INTEGER PRIMARY KEY,
            position     INTEGER NOT NULL,
            name         TEXT NOT NULL,
            birth_year   INTEGER NOT NULL,
            death_year   INTEGER,
            age_at_death INTEGER,
            processed_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(name, birth_year)
        );
        CREATE INDEX IF NOT EXISTS idx_records_position ON pm_records(position);

        CREATE TABLE IF NOT EXISTS skipped_rows (
            id           INTEGER PRIMARY KEY,
            row_text     TEXT NOT NULL,
            reason       TEXT NOT NULL,
            processed_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

// ── Page cache ──

pub fn save_page(conn: &Connection, page: &FetchedPage) -> Result<()> {
    conn.execute(
        "INSERT INTO pages (url, html, status, latency_ms, fetched_at)
         VALUES (?1, ?2, ?3, ?4, datetime('now'))
         ON CONFLICT(url) DO UPDATE SET
             html = excluded.html,
             status = excluded.status,
             latency_ms = excluded.latency_ms,
             fetched_at = excluded.fetched_at",
        rusqlite::params![page.url, page.html, page.status, page.latency_ms],
    )?;
    Ok(())
}

pub fn load_page(conn: &Connection, url: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT html FROM pages WHERE url = ?1")?;
    let html = stmt
        .query_row([url], |row| row.get::<_, Option<String>>(0))
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(other),
        })?;
    Ok(html.flatten())
}

// ── Records ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PmRecord {
    pub name: String,
    pub birth_year: i32,
    pub death_year: Option<i32>,
    pub age_at_death: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub text: String,
    pub reason: String,
}

/// Replace the stored record set and diagnostics with the outcome of one
/// processing run. Position preserves first-appearance order in the table.
pub fn replace_records(
    conn: &Connection,
    records: &[PmRecord],
    skipped: &[SkippedRow],
) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM pm_records", [])?;
    tx.execute("DELETE FROM skipped_rows", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO pm_records (position, name, birth_year, death_year, age_at_death)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (i, r) in records.iter().enumerate() {
            stmt.execute(rusqlite::params![
                i as i64,
                r.name,
                r.birth_year,
                r.death_year,
                r.age_at_death
            ])?;
        }
        let mut stmt =
            tx.prepare("INSERT INTO skipped_rows (row_text, reason) VALUES (?1, ?2)")?;
        for s in skipped {
            stmt.execute(rusqlite::params![s.text, s.reason])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn fetch_records(conn: &Connection) -> Result<Vec<PmRecord>> {
    let mut stmt = conn.prepare(
        "SELECT name, birth_year, death_year, age_at_death
         FROM pm_records ORDER BY position",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(PmRecord {
                name: row.get(0)?,
                birth_year: row.get(1)?,
                death_year: row.get(2)?,
                age_at_death: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn fetch_skipped(conn: &Connection) -> Result<Vec<SkippedRow>> {
    let mut stmt = conn.prepare("SELECT row_text, reason FROM skipped_rows ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SkippedRow {
                text: row.get(0)?,
                reason: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub pages: i64,
    pub records: i64,
    pub living: i64,
    pub skipped: i64,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let count = |sql: &str| -> Result<i64> {
        Ok(conn.query_row(sql, [], |row| row.get(0))?)
    };
    Ok(Stats {
        pages: count("SELECT COUNT(*) FROM pages")?,
        records: count("SELECT COUNT(*) FROM pm_records")?,
        living: count("SELECT COUNT(*) FROM pm_records WHERE death_year IS NULL")?,
        skipped: count("SELECT COUNT(*) FROM skipped_rows")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn record(name: &str, birth: i32, death: Option<i32>) -> PmRecord {
        PmRecord {
            name: name.into(),
            birth_year: birth,
            death_year: death,
            age_at_death: death.map(|d| d - birth),
        }
    }

    #[test]
    fn records_round_trip_in_order() {
        let conn = mem_conn();
        let records = vec![
            record("Edmund Barton", 1849, Some(1920)),
            record("Jane Citizen", 1975, None),
        ];
        replace_records(&conn, &records, &[]).unwrap();
        assert_eq!(fetch_records(&conn).unwrap(), records);
    }

    #[test]
    fn replace_is_a_full_swap() {
        let conn = mem_conn();
        replace_records(&conn, &[record("A", 1850, Some(1910))], &[]).unwrap();
        replace_records(&conn, &[record("B", 1860, Some(1930))], &[]).unwrap();
        let records = fetch_records(&conn).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "B");
    }

    #[test]
    fn skipped_rows_retained() {
        let conn = mem_conn();
        let skipped = vec![SkippedRow {
            text: "garbage".into(),
            reason: "no year pattern".into(),
        }];
        replace_records(&conn, &[], &skipped).unwrap();
        let out = fetch_skipped(&conn).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "garbage");
    }

    #[test]
    fn stats_counts() {
        let conn = mem_conn();
        let records = vec![
            record("A", 1850, Some(1910)),
            record("B", 1975, None),
        ];
        let skipped = vec![SkippedRow {
            text: "x".into(),
            reason: "y".into(),
        }];
        replace_records(&conn, &records, &skipped).unwrap();
        let s = get_stats(&conn).unwrap();
        assert_eq!(s.records, 2);
        assert_eq!(s.living, 1);
        assert_eq!(s.skipped, 1);
    }
}
