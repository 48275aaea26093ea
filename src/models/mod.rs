pub mod item;
pub mod schema;
pub mod user;

pub use item::Item;
pub use schema::{FieldError, FieldErrorKind, ValidationError};
pub use user::User;

use serde::Serialize;
use serde_json::{Map, Value};

/// A typed row of one store table.
///
/// Implementors describe their field table in `from_object`; everything else
/// (body-level checks, JSON output, the insert row) is shared.
pub trait Model: Serialize + Sized + Send + Sync + 'static {
    /// Name of the backing table in the store
    const TABLE: &'static str;

    /// Build a record from an untyped object, naming every offending field on failure
    fn from_object(input: &Map<String, Value>) -> Result<Self, ValidationError>;

    /// Store-assigned identifier, absent until the record has been persisted
    fn id(&self) -> Option<i64>;

    /// Validate any JSON value; non-objects are rejected as a whole
    fn validate(input: &Value) -> Result<Self, ValidationError> {
        match input {
            Value::Object(map) => Self::from_object(map),
            _ => Err(ValidationError::single(FieldError::body(
                FieldErrorKind::ModelType,
            ))),
        }
    }

    /// Full representation, absent optional fields as `null`
    fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Checks a constructed record must pass before it may be written
    fn check(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Row sent on insert: absent fields (the identifier included) are omitted.
    /// Fails without producing a row when `check` does.
    fn to_insert_row(&self) -> Result<Map<String, Value>, ValidationError> {
        self.check()?;
        let mut row = schema::to_insert_row(self).map_err(|e| {
            tracing::error!("Failed to serialize {} row: {}", Self::TABLE, e);
            ValidationError::single(FieldError::body(FieldErrorKind::ModelType))
        })?;
        row.remove("id");
        Ok(row)
    }
}
