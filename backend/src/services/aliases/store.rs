//! SQLite persistence for aliases, one table keyed by site root and alias path.

use common::model::alias::{AliasMode, AliasRecord};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AliasStoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid path pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Stored alias has an invalid mode: {0}")]
    InvalidMode(String),
}

/// Handle to the alias database. Cheap to clone; every operation opens its
/// own connection.
#[derive(Debug, Clone)]
pub struct AliasStore {
    path: PathBuf,
}

impl AliasStore {
    /// Opens (and if needed creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AliasStoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.connection()?.execute_batch(
            "CREATE TABLE IF NOT EXISTS aliases (
                site_root   TEXT NOT NULL,
                alias_path  TEXT NOT NULL,
                target_path TEXT NOT NULL,
                mode        TEXT NOT NULL,
                PRIMARY KEY (site_root, alias_path)
            )",
        )?;
        Ok(store)
    }

    pub fn connection(&self) -> Result<Connection, AliasStoreError> {
        Ok(Connection::open(&self.path)?)
    }

    pub fn list(&self, site_root: &str) -> Result<Vec<AliasRecord>, AliasStoreError> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT alias_path, target_path, mode FROM aliases
             WHERE site_root = ?1 ORDER BY alias_path",
        )?;
        let rows = stmt
            .query_map(params![site_root], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(alias_path, target_path, mode)| {
                let mode = mode
                    .parse::<AliasMode>()
                    .map_err(|_| AliasStoreError::InvalidMode(mode))?;
                Ok(AliasRecord {
                    alias_path,
                    target_path,
                    mode,
                })
            })
            .collect()
    }
}

/// Current target of `alias_path`, if the alias exists.
pub fn find_target(
    tx: &Transaction<'_>,
    site_root: &str,
    alias_path: &str,
) -> Result<Option<String>, AliasStoreError> {
    Ok(tx
        .query_row(
            "SELECT target_path FROM aliases WHERE site_root = ?1 AND alias_path = ?2",
            params![site_root, alias_path],
            |row| row.get::<_, String>(0),
        )
        .optional()?)
}

pub fn save(
    tx: &Transaction<'_>,
    site_root: &str,
    record: &AliasRecord,
) -> Result<(), AliasStoreError> {
    tx.execute(
        "INSERT OR REPLACE INTO aliases (site_root, alias_path, target_path, mode)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            site_root,
            &record.alias_path,
            &record.target_path,
            record.mode.as_str()
        ],
    )?;
    Ok(())
}
