use crate::{Result, SampleStore, StorageError};
use chrono::NaiveDateTime;
use hostmon_common::types::{Sample, SAMPLE_TIME_FORMAT};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::Mutex;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS stats (
    time TEXT,
    cpu REAL,
    memory REAL,
    disk REAL,
    sent REAL,
    recv REAL
);
CREATE INDEX IF NOT EXISTS idx_stats_time ON stats(time);
";

pub struct SqliteSampleStore {
    conn: Mutex<Connection>,
}

impl SqliteSampleStore {
    /// Opens (creating if needed) the store for writing.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %path.display(), "Opened sample store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an existing store for reading. Never creates the file or the schema.
    ///
    /// The connection is not `SQLITE_OPEN_READ_ONLY`: a WAL reader needs to
    /// create the shared-memory file when no writer is running.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StorageError::Missing {
                path: path.display().to_string(),
            });
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        f(&conn)
    }
}

impl SampleStore for SqliteSampleStore {
    fn insert(&self, sample: &Sample) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO stats (time, cpu, memory, disk, sent, recv) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    sample.formatted_time(),
                    sample.cpu_percent,
                    sample.memory_percent,
                    sample.disk_percent,
                    sample.bytes_sent_mb,
                    sample.bytes_recv_mb,
                ],
            )?;
            Ok(())
        })
    }

    fn recent(&self, limit: usize) -> Result<Vec<Sample>> {
        self.with_conn(|conn| {
            // Rows written within the same second keep insertion order.
            let mut stmt = conn.prepare_cached(
                "SELECT time, cpu, memory, disk, sent, recv FROM stats
                 ORDER BY time DESC, rowid DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, f64>(5)?,
                ))
            })?;

            let mut samples = Vec::with_capacity(limit.min(1024));
            for row in rows {
                let (time, cpu, memory, disk, sent, recv) = row?;
                let timestamp = NaiveDateTime::parse_from_str(&time, SAMPLE_TIME_FORMAT)
                    .map_err(|_| StorageError::InvalidTimestamp { value: time })?;
                samples.push(Sample {
                    timestamp,
                    cpu_percent: cpu,
                    memory_percent: memory,
                    disk_percent: disk,
                    bytes_sent_mb: sent,
                    bytes_recv_mb: recv,
                });
            }
            Ok(samples)
        })
    }

    fn count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM stats", [], |row| row.get(0))?;
            Ok(n.max(0) as u64)
        })
    }
}
