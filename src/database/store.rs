use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failures talking to the table store, split by how a caller should react
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network failure, timeout or a server-side outage; worth retrying later
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store understood the request and refused it (policy denial, constraint, bad column)
    #[error("Store rejected the request ({status}): {message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The store answered with data that does not match the declared record shape
    #[error("Store returned malformed data: {0}")]
    Data(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }

    pub fn rejected(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        StoreError::Rejected {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn data(message: impl Into<String>) -> Self {
        StoreError::Data(message.into())
    }
}

/// Row-oriented access to a remote table store.
///
/// Rows are untyped JSON; typing happens in [`crate::database::Repository`].
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Every row of `table`, in the order the store returns them
    async fn select_all(&self, table: &str) -> Result<Vec<Value>, StoreError>;

    /// Insert one row and return the rows the store reports as inserted
    async fn insert(&self, table: &str, row: Map<String, Value>) -> Result<Vec<Value>, StoreError>;
}
