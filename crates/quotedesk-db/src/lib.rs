// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use quotedesk_app::{Quote, QuoteId, QuoteRepository};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};

pub const APP_NAME: &str = "quotedesk";
pub const QUOTES_KEY: &str = "quotes";

const DEFAULT_QUOTES: &str = include_str!("data/quotes.json");

const REQUIRED_COLUMNS: [&str; 3] = ["key", "value", "updated_at"];

/// Key/value storage backed by a single SQLite table.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if table_exists(&self.conn, "local_storage")? {
            validate_schema(&self.conn)?;
            return Ok(());
        }
        self.conn
            .execute_batch(include_str!("sql/schema.sql"))
            .context("create schema")
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("read storage key {key}"))
    }

    /// Overwrites `key` in one transaction. Nothing is written on failure.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let now = now_rfc3339()?;
        let tx = self
            .conn
            .unchecked_transaction()
            .with_context(|| format!("begin write of storage key {key}"))?;
        tx.execute(
            "
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
              value = excluded.value,
              updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )
        .with_context(|| format!("upsert storage key {key}"))?;
        tx.commit()
            .with_context(|| format!("commit storage key {key}"))
    }

    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?", params![key])
            .with_context(|| format!("remove storage key {key}"))?;
        Ok(removed > 0)
    }

    pub fn updated_at(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT updated_at FROM local_storage WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("read timestamp of storage key {key}"))
    }
}

/// Where the current canonical sequence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Defaults,
}

impl LoadSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Persisted => "saved quotes",
            Self::Defaults => "default quotes",
        }
    }
}

/// The canonical, ordered quote sequence and its durable copy.
pub struct QuoteStore {
    storage: Store,
    quotes: Vec<Quote>,
    source: LoadSource,
}

impl QuoteStore {
    /// Reads the persisted sequence, falling back to the bundled defaults when
    /// nothing usable is stored. Defaults are not written back until the
    /// first commit.
    pub fn load(storage: Store) -> Result<Self> {
        let (quotes, source) = match read_persisted(&storage) {
            Ok(Some(quotes)) => {
                info!(count = quotes.len(), "loaded saved quotes");
                (quotes, LoadSource::Persisted)
            }
            Ok(None) => {
                info!("no saved quotes, using defaults");
                (default_quotes()?, LoadSource::Defaults)
            }
            Err(error) => {
                warn!("saved quotes are unreadable, using defaults: {error:#}");
                (default_quotes()?, LoadSource::Defaults)
            }
        };
        Ok(Self {
            storage,
            quotes,
            source,
        })
    }

    pub fn storage(&self) -> &Store {
        &self.storage
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Forgets the persisted sequence and restores the defaults in memory.
    pub fn reset(&mut self) -> Result<()> {
        let defaults = default_quotes()?;
        let removed = self
            .storage
            .remove_item(QUOTES_KEY)
            .context("forget saved quotes -- check that the database is writable and retry")?;
        self.quotes = defaults;
        self.source = LoadSource::Defaults;
        info!(removed, "quotes reset to defaults");
        Ok(())
    }

    /// Pretty-printed JSON of the canonical sequence.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.quotes).context("serialize quotes")
    }
}

impl QuoteRepository for QuoteStore {
    fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    fn commit(&mut self, quotes: Vec<Quote>) -> Result<()> {
        if let Some(id) = duplicate_id(&quotes) {
            bail!("quote id {id} appears more than once; refusing to save");
        }
        let raw = serde_json::to_string(&quotes).context("serialize quotes")?;
        self.storage
            .set_item(QUOTES_KEY, &raw)
            .context("write quotes to local storage -- check that the database is writable")?;
        debug!(count = quotes.len(), bytes = raw.len(), "quotes committed");
        self.quotes = quotes;
        self.source = LoadSource::Persisted;
        Ok(())
    }
}

/// The bundled dataset used when storage holds nothing usable.
pub fn default_quotes() -> Result<Vec<Quote>> {
    serde_json::from_str(DEFAULT_QUOTES).context("parse bundled default quotes")
}

fn read_persisted(storage: &Store) -> Result<Option<Vec<Quote>>> {
    let Some(raw) = storage.get_item(QUOTES_KEY)? else {
        return Ok(None);
    };
    let quotes: Vec<Quote> = serde_json::from_str(&raw).context("parse saved quotes")?;
    if let Some(id) = duplicate_id(&quotes) {
        bail!("saved quotes contain duplicate id {id}");
    }
    Ok(Some(quotes))
}

fn duplicate_id(quotes: &[Quote]) -> Option<&QuoteId> {
    let mut seen = BTreeSet::new();
    quotes
        .iter()
        .map(|quote| &quote.id)
        .find(|id| !seen.insert(*id))
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("QUOTEDESK_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set QUOTEDESK_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("quotedesk.db"))
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn validate_schema(conn: &Connection) -> Result<()> {
    let mut stmt = conn
        .prepare("PRAGMA table_info(local_storage)")
        .context("inspect columns for local_storage")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .context("query column info for local_storage")?
        .collect::<rusqlite::Result<BTreeSet<_>>>()
        .context("collect columns for local_storage")?;

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !columns.contains(*column))
        .collect();
    if !missing.is_empty() {
        bail!(
            "table `local_storage` is missing required columns: {}; point [storage].db_path at a quotedesk database",
            missing.join(", ")
        );
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("format current timestamp")
}
