use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;

use crate::error::ApiError;
use crate::models::{FieldError, FieldErrorKind, Model, ValidationError};

/// Turn a POST body into a record that has not been persisted yet.
///
/// Identifiers belong to the store, so a client-supplied `id` is an error even
/// when it is well-typed.
pub fn candidate_from_body<T: Model>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::InvalidJson(rejection.body_text()))?;

    let supplied_id = payload.get("id").is_some_and(|v| !v.is_null());
    let forbidden_id = || FieldError::new("id", FieldErrorKind::Forbidden);

    match (T::validate(&payload), supplied_id) {
        (Ok(record), false) => Ok(record),
        (Ok(_), true) => Err(ValidationError::single(forbidden_id()).into()),
        (Err(err), false) => Err(err.into()),
        (Err(err), true) => {
            let mut errors: Vec<FieldError> = err
                .errors()
                .iter()
                .filter(|e| e.field.as_deref() != Some("id"))
                .cloned()
                .collect();
            errors.push(forbidden_id());
            Err(ValidationError::new(errors).into())
        }
    }
}
