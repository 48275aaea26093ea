use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::database::store::{RowStore, StoreError};
use crate::models::{Model, ValidationError};

/// Why a write did not happen or did not come back cleanly
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The candidate itself is unfit to be written; the store was never called
    #[error("Invalid record: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Maps typed records onto one store table.
///
/// Every row coming back from the store is validated; a row that does not fit
/// the record shape fails the whole call instead of being skipped.
pub struct Repository<T> {
    store: Arc<dyn RowStore>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _phantom: PhantomData,
        }
    }
}

impl<T: Model> Repository<T> {
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    /// All records, in store order
    pub async fn list_all(&self) -> Result<Vec<T>, StoreError> {
        let rows = self.store.select_all(T::TABLE).await?;
        debug!("Fetched {} rows from {}", rows.len(), T::TABLE);

        rows.iter()
            .enumerate()
            .map(|(index, row)| Self::from_row(index, row))
            .collect()
    }

    /// Insert `candidate` (its identifier, if any, is not sent) and return the stored record
    pub async fn create_one(&self, candidate: &T) -> Result<T, RepositoryError> {
        let row = candidate.to_insert_row()?;

        let rows = self.store.insert(T::TABLE, row).await?;
        let first = rows.first().ok_or_else(|| {
            StoreError::data(format!("insert into {} returned no row", T::TABLE))
        })?;

        let created = Self::from_row(0, first)?;
        info!("Created {} record {:?}", T::TABLE, created.id());
        Ok(created)
    }

    fn from_row(index: usize, row: &Value) -> Result<T, StoreError> {
        let record = T::validate(row).map_err(|e| {
            StoreError::data(format!("{} row {}: {}", T::TABLE, index, e))
        })?;

        if record.id().is_none() {
            return Err(StoreError::data(format!(
                "{} row {} has no identifier",
                T::TABLE,
                index
            )));
        }

        Ok(record)
    }
}
