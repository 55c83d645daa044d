//! Local chart backup repository.
//!
//! # Responsibility
//! - Keep best-effort copies of charts whose backend save failed.
//! - Store the downloadable chart file verbatim so a backup can be
//!   re-imported like any user download.
//!
//! # Invariants
//! - Every backup gets a fresh `BackupId`; backups are never updated.
//! - Listing is ordered newest first, ties broken by id.
//! - Read paths reject rows whose payload no longer decodes.

use crate::chart::file::{ChartFile, ChartFileError};
use crate::db::DbError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type BackupId = Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(BackupId),
    /// Chart file could not be encoded for storage.
    Encode(ChartFileError),
    /// Stored row no longer matches the expected shape.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "chart backup not found: {id}"),
            Self::Encode(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored backup: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ChartFileError> for RepoError {
    fn from(value: ChartFileError) -> Self {
        Self::Encode(value)
    }
}

/// Stored backup with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBackup {
    pub id: BackupId,
    /// Unix epoch milliseconds when the backup was written.
    pub saved_at_ms: i64,
    pub file: ChartFile,
}

pub trait ChartBackupRepository {
    fn save_backup(&self, file: &ChartFile) -> RepoResult<BackupId>;
    fn get_backup(&self, id: BackupId) -> RepoResult<Option<ChartBackup>>;
    fn list_backups(&self, limit: u32) -> RepoResult<Vec<ChartBackup>>;
    fn delete_backup(&self, id: BackupId) -> RepoResult<()>;
}

/// SQLite-backed backup repository.
pub struct SqliteChartBackupRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChartBackupRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ChartBackupRepository for SqliteChartBackupRepository<'_> {
    fn save_backup(&self, file: &ChartFile) -> RepoResult<BackupId> {
        let id = Uuid::new_v4();
        let payload = serde_json::to_string(file).map_err(ChartFileError::from)?;

        self.conn.execute(
            "INSERT INTO chart_backups (id, name, rows, columns, payload, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.to_string(),
                file.name,
                file.rows,
                file.columns,
                payload,
                Utc::now().timestamp_millis(),
            ],
        )?;
        Ok(id)
    }

    fn get_backup(&self, id: BackupId) -> RepoResult<Option<ChartBackup>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, payload, created_at FROM chart_backups WHERE id = ?1",
                [id.to_string()],
                read_raw_backup,
            )
            .optional()?;
        row.map(RawBackup::decode).transpose()
    }

    fn list_backups(&self, limit: u32) -> RepoResult<Vec<ChartBackup>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, payload, created_at FROM chart_backups
             ORDER BY created_at DESC, id ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map([i64::from(limit)], read_raw_backup)?;

        let mut backups = Vec::new();
        for row in rows {
            backups.push(row?.decode()?);
        }
        Ok(backups)
    }

    fn delete_backup(&self, id: BackupId) -> RepoResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM chart_backups WHERE id = ?1", [id.to_string()])?;
        if affected == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

struct RawBackup {
    id: String,
    payload: String,
    created_at: i64,
}

impl RawBackup {
    fn decode(self) -> RepoResult<ChartBackup> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|_| RepoError::InvalidData(format!("invalid backup id `{}`", self.id)))?;
        let file = ChartFile::from_json(&self.payload)
            .map_err(|err| RepoError::InvalidData(format!("backup {id}: {err}")))?;
        Ok(ChartBackup {
            id,
            saved_at_ms: self.created_at,
            file,
        })
    }
}

fn read_raw_backup(row: &Row<'_>) -> rusqlite::Result<RawBackup> {
    Ok(RawBackup {
        id: row.get(0)?,
        payload: row.get(1)?,
        created_at: row.get(2)?,
    })
}
