//! Persistent storage using redb.
//!
//! The whole system lives in one flat key-value namespace: gift records
//! under `gift_*` keys, catalogs, users and session flags under fixed
//! keys. Values are JSON strings. There is no schema enforcement beyond
//! what the typed operations in the submodules choose to write.
//!
//! Capacity is bounded by a byte quota, like the browser storage the
//! legacy client wrote to. A write that would exceed
//! the quota fails with `QuotaExceeded` and leaves the namespace
//! untouched; there is no eviction policy.

use crate::error::{CraftError, CraftResult};
use parking_lot::{Mutex, RwLock};
use redb::{Database, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

// Submodules
mod catalog;
mod gifts;
mod session;
mod users;

pub use gifts::GIFT_KEY_PREFIX;

/// The single flat namespace (key: record key, value: JSON string)
const RECORDS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("records");

/// Default byte quota for the whole namespace (5 MiB)
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Flat key-value store over redb
///
/// Writes are serialized through redb's single write transaction, so a
/// read-modify-write performed via [`Store::update_entry`] cannot lose
/// updates within one process.
#[derive(Clone)]
pub struct Store {
    db: Arc<RwLock<Database>>,
    quota: usize,
    used: Arc<Mutex<usize>>,
}

impl Store {
    /// Open or create a store at the given path with the default quota.
    pub fn new(path: impl AsRef<Path>) -> CraftResult<Self> {
        Self::with_quota(path, DEFAULT_QUOTA_BYTES)
    }

    /// Open or create a store with an explicit byte quota.
    pub fn with_quota(path: impl AsRef<Path>, quota: usize) -> CraftResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
        }
        write_txn.commit()?;

        // Recompute used bytes with one full scan
        let mut used = 0;
        {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(RECORDS_TABLE)?;
            for entry in table.iter()? {
                let (key, value) = entry?;
                used += key.value().len() + value.value().len();
            }
        }

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
            quota,
            used: Arc::new(Mutex::new(used)),
        })
    }

    /// Read the raw value stored under a key.
    pub fn get(&self, key: &str) -> CraftResult<Option<String>> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;
        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    /// Write a raw value, enforcing the quota before touching storage.
    pub fn set(&self, key: &str, value: &str) -> CraftResult<()> {
        let value = value.to_string();
        self.update_entry(key, move |_| Ok(value))
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> CraftResult<()> {
        let db = self.db.read();
        let mut used = self.used.lock();
        let write_txn = db.begin_write()?;
        let removed;
        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            removed = table
                .remove(key)?
                .map(|v| key.len() + v.value().len())
                .unwrap_or(0);
        }
        write_txn.commit()?;
        *used -= removed;
        Ok(())
    }

    /// The key at a given position in the namespace's enumeration order.
    pub fn key_at(&self, index: usize) -> CraftResult<Option<String>> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;
        for (i, entry) in table.iter()?.enumerate() {
            let (key, _) = entry?;
            if i == index {
                return Ok(Some(key.value().to_string()));
            }
        }
        Ok(None)
    }

    /// Number of keys in the namespace.
    pub fn len(&self) -> CraftResult<usize> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;
        let mut count = 0;
        for entry in table.iter()? {
            entry?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> CraftResult<bool> {
        Ok(self.len()? == 0)
    }

    /// All keys starting with a prefix. Full scan over the namespace,
    /// not an index lookup.
    pub fn keys_with_prefix(&self, prefix: &str) -> CraftResult<Vec<String>> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;
        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            let key = key.value();
            if key.starts_with(prefix) {
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }

    /// Bytes currently accounted against the quota.
    pub fn used_bytes(&self) -> usize {
        *self.used.lock()
    }

    /// The configured quota in bytes.
    pub fn quota(&self) -> usize {
        self.quota
    }

    /// Read-modify-write a single entry inside one write transaction.
    ///
    /// The closure receives the current value (if any) and returns the
    /// replacement. Quota is checked against the projected total before
    /// the insert; on failure the transaction aborts and nothing is
    /// written.
    pub(crate) fn update_entry(
        &self,
        key: &str,
        f: impl FnOnce(Option<String>) -> CraftResult<String>,
    ) -> CraftResult<()> {
        let db = self.db.read();
        let mut used = self.used.lock();
        let write_txn = db.begin_write()?;
        let (old_len, new_len);
        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            let old = table.get(key)?.map(|v| v.value().to_string());
            old_len = old.as_ref().map(|v| key.len() + v.len()).unwrap_or(0);
            let new = f(old)?;
            new_len = key.len() + new.len();
            let projected = *used - old_len + new_len;
            if projected > self.quota {
                return Err(CraftError::QuotaExceeded {
                    needed: projected,
                    quota: self.quota,
                });
            }
            table.insert(key, new.as_str())?;
        }
        write_txn.commit()?;
        *used = *used - old_len + new_len;
        Ok(())
    }

    /// Read and deserialize a JSON value.
    pub(crate) fn read_json<T: DeserializeOwned>(&self, key: &str) -> CraftResult<Option<T>> {
        match self.get(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .map_err(|e| CraftError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and write a JSON value.
    pub(crate) fn write_json<T: Serialize>(&self, key: &str, value: &T) -> CraftResult<()> {
        let raw =
            serde_json::to_string(value).map_err(|e| CraftError::Serialization(e.to_string()))?;
        self.set(key, &raw)
    }

    /// Read a JSON array key, treating an absent key as empty.
    pub(crate) fn read_array<T: DeserializeOwned>(&self, key: &str) -> CraftResult<Vec<T>> {
        Ok(self.read_json(key)?.unwrap_or_default())
    }
}
