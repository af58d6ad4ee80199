//! # Dashboard Database
//!
//! SQLite persistence for everything the dashboard manages: connections,
//! collections, namespaces, general options and the license catalogue.
//!
//! A fresh `rusqlite::Connection` is opened per operation, with foreign keys
//! enabled so deleting a connection removes its collections and deleting a
//! license clears it from the collections that used it. List and JSON valued
//! columns carry a `_json` suffix.

pub mod collections;
pub mod connections;
pub mod licenses;
pub mod namespaces;
pub mod options;

use common::model::general_option::GeneralOption;
use common::model::license::License;
use log::info;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS connection (
    uuid          TEXT PRIMARY KEY,
    name          TEXT NOT NULL UNIQUE,
    host          TEXT NOT NULL,
    port          INTEGER NOT NULL,
    role          TEXT NOT NULL,
    password      TEXT NOT NULL,
    database_name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS license (
    title            TEXT PRIMARY KEY,
    url              TEXT NOT NULL,
    type             TEXT NOT NULL DEFAULT 'text/html',
    alternative_url  TEXT,
    alternative_type TEXT
);
CREATE TABLE IF NOT EXISTS collection (
    uuid                        TEXT PRIMARY KEY,
    id                          TEXT NOT NULL UNIQUE,
    title                       TEXT NOT NULL,
    description                 TEXT NOT NULL DEFAULT '',
    connection_name             TEXT NOT NULL
        REFERENCES connection(name) ON DELETE CASCADE ON UPDATE CASCADE,
    url                         TEXT NOT NULL DEFAULT '',
    license_title               TEXT
        REFERENCES license(title) ON DELETE SET NULL ON UPDATE CASCADE,
    extent_json                 TEXT,
    crs_json                    TEXT NOT NULL,
    storage_crs                 TEXT NOT NULL,
    storage_crs_coordinate_epoch REAL,
    date_time_fields_json       TEXT NOT NULL DEFAULT '[]',
    selected_date_time_field    TEXT
);
CREATE TABLE IF NOT EXISTS namespace (
    uuid TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    url  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS general_option (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid stored json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("unknown {kind} {name:?}")]
    UnknownReference { kind: &'static str, name: String },
    #[error("no data provided")]
    Empty,
    #[error("invalid payload: {0}")]
    Invalid(String),
}

impl StoreError {
    /// Unique or foreign key constraint rejected the write.
    pub fn is_conflict(&self) -> bool {
        match self {
            StoreError::UnknownReference { .. } => true,
            StoreError::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == ErrorCode::ConstraintViolation
            }
            _ => false,
        }
    }
}

/// Location of the SQLite file. Cheap to clone into Actix app data.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }

    /// Creates missing tables and seeds default licenses and options.
    /// Existing rows are left untouched.
    pub fn init(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = self.open()?;
        conn.execute_batch(SCHEMA)?;

        for license in License::defaults() {
            conn.execute(
                "INSERT OR IGNORE INTO license (title, url, type, alternative_url, alternative_type)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    license.title,
                    license.url,
                    license.media_type,
                    license.alternative_url,
                    license.alternative_type
                ],
            )?;
        }
        for option in GeneralOption::defaults() {
            conn.execute(
                "INSERT OR IGNORE INTO general_option (key, value) VALUES (?1, ?2)",
                params![option.key, option.value],
            )?;
        }

        info!("Database ready at {}", self.path.display());
        Ok(())
    }
}

/// Returns `uuid`, or a fresh v4 when the client left it nil.
pub(crate) fn assign_uuid(uuid: Uuid) -> Uuid {
    if uuid.is_nil() {
        Uuid::new_v4()
    } else {
        uuid
    }
}

pub(crate) fn uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Database;
    use tempfile::TempDir;

    /// An initialized database inside a temp dir that lives as long as the guard.
    pub fn database() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("test.sqlite"));
        db.init().unwrap();
        (dir, db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_seeds_defaults_once() {
        let (_dir, db) = test_support::database();
        db.init().unwrap();

        let conn = db.open().unwrap();
        let licenses: i64 = conn
            .query_row("SELECT COUNT(*) FROM license", [], |row| row.get(0))
            .unwrap();
        let options: i64 = conn
            .query_row("SELECT COUNT(*) FROM general_option", [], |row| row.get(0))
            .unwrap();

        assert_eq!(licenses, 7);
        assert_eq!(options, 2);
    }

    #[test]
    fn nil_uuid_is_replaced() {
        assert!(!assign_uuid(Uuid::nil()).is_nil());
        let id = Uuid::new_v4();
        assert_eq!(assign_uuid(id), id);
    }
}
