use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::database::store::{RowStore, StoreError};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Value>,
    last_id: i64,
    deny_inserts: bool,
}

/// In-process stand-in for the remote store.
///
/// Assigns sequential identifiers per table and keeps insertion order. Can be
/// told to refuse inserts the way a row-level policy would, or to behave as if
/// the network were down.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every insert into `table` until [`MemoryStore::allow_inserts`]
    pub async fn deny_inserts(&self, table: &str) {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().deny_inserts = true;
    }

    pub async fn allow_inserts(&self, table: &str) {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().deny_inserts = false;
    }

    /// Make every call fail as if the store could not be reached
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Append a row verbatim, bypassing identifier assignment
    pub async fn seed_raw(&self, table: &str, row: Value) {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().rows.push(row);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    async fn select_all(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.get(table).map(|t| t.rows.clone()).unwrap_or_default())
    }

    async fn insert(&self, table: &str, mut row: Map<String, Value>) -> Result<Vec<Value>, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let entry = tables.entry(table.to_string()).or_default();

        if entry.deny_inserts {
            return Err(StoreError::rejected(
                401,
                Some("42501".to_string()),
                format!("new row violates row-level security policy for table \"{}\"", table),
            ));
        }

        entry.last_id += 1;
        row.insert("id".to_string(), Value::from(entry.last_id));
        let stored = Value::Object(row);
        entry.rows.push(stored.clone());
        Ok(vec![stored])
    }
}
