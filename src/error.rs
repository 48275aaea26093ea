// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::{RepositoryError, StoreError};
use crate::models::{FieldError, FieldErrorKind, ValidationError};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 422 Unprocessable Entity (request body does not fit the record schema)
    ValidationError(ValidationError),

    // 422 Unprocessable Entity (body is not JSON at all)
    InvalidJson(String),

    // 403 Forbidden (store policy refused the operation)
    StoreRejected {
        message: String,
        store_code: Option<String>,
    },

    // 502 Bad Gateway (store data does not fit the record schema)
    StoreData(String),

    // 503 Service Unavailable (store unreachable)
    StoreUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidJson(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::StoreRejected { .. } => StatusCode::FORBIDDEN,
            ApiError::StoreData(_) => StatusCode::BAD_GATEWAY,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::StoreRejected { .. } => "STORE_REJECTED",
            ApiError::StoreData(_) => "STORE_DATA_ERROR",
            ApiError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body.
    ///
    /// Field-level failures use the `{"detail": [{type, loc, msg}]}` layout;
    /// everything else is `{"detail": message, "code": CODE}`.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError(err) => json!({
                "detail": err.errors().iter().map(field_error_json).collect::<Vec<_>>()
            }),
            ApiError::InvalidJson(message) => json!({
                "detail": [{
                    "type": FieldErrorKind::JsonInvalid,
                    "loc": ["body"],
                    "msg": FieldErrorKind::JsonInvalid.message(),
                    "ctx": { "error": message }
                }]
            }),
            ApiError::StoreRejected { message, store_code } => {
                let mut body = json!({
                    "detail": message,
                    "code": self.error_code()
                });
                if let Some(store_code) = store_code {
                    body["store_code"] = json!(store_code);
                }
                body
            }
            ApiError::StoreData(message) | ApiError::StoreUnavailable(message) => json!({
                "detail": message,
                "code": self.error_code()
            }),
        }
    }
}

fn field_error_json(error: &FieldError) -> Value {
    let loc = match &error.field {
        Some(field) => json!(["body", field]),
        None => json!(["body"]),
    };
    json!({
        "type": error.kind,
        "loc": loc,
        "msg": error.kind.message()
    })
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::ValidationError(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => {
                tracing::warn!("Store unavailable: {}", msg);
                ApiError::StoreUnavailable("Data store temporarily unavailable".to_string())
            }
            StoreError::Rejected { status, code, message } => {
                tracing::warn!("Store rejected request ({}): {}", status, message);
                ApiError::StoreRejected {
                    message,
                    store_code: code,
                }
            }
            StoreError::Data(msg) => {
                // Schema drift between this service and the store; keep details in the logs
                tracing::error!("Store data error: {}", msg);
                ApiError::StoreData("Data store returned records that do not match the schema".to_string())
            }
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Invalid(err) => ApiError::ValidationError(err),
            RepositoryError::Store(err) => err.into(),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::ValidationError(err) => write!(f, "{}", err),
            ApiError::InvalidJson(msg)
            | ApiError::StoreData(msg)
            | ApiError::StoreUnavailable(msg)
            | ApiError::StoreRejected { message: msg, .. } => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_list_each_field() {
        let err = ApiError::from(ValidationError::new(vec![
            FieldError::new("name", FieldErrorKind::Missing),
            FieldError::new("price", FieldErrorKind::FloatType),
        ]));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.to_json(),
            json!({
                "detail": [
                    { "type": "missing", "loc": ["body", "name"], "msg": "Field required" },
                    { "type": "float_type", "loc": ["body", "price"], "msg": "Input should be a valid number" }
                ]
            })
        );
    }

    #[test]
    fn store_errors_map_to_distinct_statuses() {
        let rejected = ApiError::from(StoreError::rejected(401, Some("42501".into()), "denied"));
        let unavailable = ApiError::from(StoreError::unavailable("connection refused"));
        let data = ApiError::from(StoreError::data("row 0: invalid fields: price"));

        assert_eq!(rejected.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(data.status_code(), StatusCode::BAD_GATEWAY);

        assert_eq!(
            rejected.to_json(),
            json!({ "detail": "denied", "code": "STORE_REJECTED", "store_code": "42501" })
        );
        assert_eq!(unavailable.to_json()["code"], "STORE_UNAVAILABLE");
        assert_eq!(data.to_json()["code"], "STORE_DATA_ERROR");
    }

    #[test]
    fn invalid_candidate_is_unprocessable_not_a_store_error() {
        let err = ApiError::from(RepositoryError::Invalid(ValidationError::single(FieldError::new(
            "price",
            FieldErrorKind::FiniteNumber,
        ))));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_json()["detail"][0]["type"], "finite_number");

        let err = ApiError::from(RepositoryError::Store(StoreError::unavailable("down")));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn invalid_json_is_unprocessable() {
        let err = ApiError::InvalidJson("expected value at line 1 column 1".into());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_json()["detail"][0]["type"], "json_invalid");
        assert_eq!(err.to_json()["detail"][0]["loc"], json!(["body"]));
    }
}
