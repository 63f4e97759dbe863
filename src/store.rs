// 🗄️ Local Store - key/value persistence, localStorage-style
//
// All application state lives under a handful of fixed logical keys, each
// holding a JSON document, in a single SQLite file with WAL mode. The core
// computation modules never touch this; they receive already-materialized
// arrays and return values.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::entities::{Session, SupplierRecord, User};
use crate::history::HistoricalEntry;

pub const SUPPLIERS_KEY: &str = "suppliers";
pub const HISTORY_KEY: &str = "historicalData";
pub const USERS_KEY: &str = "users";
pub const SESSION_KEY: &str = "session";

pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open store at {}", path.display()))?;
        Self::init(conn)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory().context("failed to open in-memory store")?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "journal_mode", "WAL")
            .context("failed to enable WAL mode")?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .context("failed to create kv_store table")?;
        Ok(LocalStore { conn })
    }

    // ========================================================================
    // RAW ITEM ACCESS
    // ========================================================================

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .with_context(|| format!("failed to read key {key:?}"))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .with_context(|| format!("failed to write key {key:?}"))?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .with_context(|| format!("failed to remove key {key:?}"))?;
        Ok(())
    }

    // ========================================================================
    // TYPED ACCESS PER LOGICAL KEY
    // ========================================================================

    pub fn load_suppliers(&self) -> Result<Vec<SupplierRecord>> {
        self.load_array(SUPPLIERS_KEY)
    }

    pub fn save_suppliers(&self, suppliers: &[SupplierRecord]) -> Result<()> {
        self.save_array(SUPPLIERS_KEY, suppliers)
    }

    pub fn load_history(&self) -> Result<Vec<HistoricalEntry>> {
        self.load_array(HISTORY_KEY)
    }

    pub fn save_history(&self, entries: &[HistoricalEntry]) -> Result<()> {
        self.save_array(HISTORY_KEY, entries)
    }

    pub fn load_users(&self) -> Result<Vec<User>> {
        self.load_array(USERS_KEY)
    }

    pub fn save_users(&self, users: &[User]) -> Result<()> {
        self.save_array(USERS_KEY, users)
    }

    pub fn load_session(&self) -> Result<Option<Session>> {
        match self.get_item(SESSION_KEY)? {
            Some(json) => Ok(Some(
                serde_json::from_str(&json).context("failed to parse stored session")?,
            )),
            None => Ok(None),
        }
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session).context("failed to serialize session")?;
        self.set_item(SESSION_KEY, &json)
    }

    pub fn clear_session(&self) -> Result<()> {
        self.remove_item(SESSION_KEY)
    }

    fn load_array<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.get_item(key)? {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("failed to parse JSON array under key {key:?}")),
            None => Ok(Vec::new()),
        }
    }

    fn save_array<T: serde::Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)
            .with_context(|| format!("failed to serialize array for key {key:?}"))?;
        self.set_item(key, &json)
    }
}

// ============================================================================
// TESTS
// ============================================================================
