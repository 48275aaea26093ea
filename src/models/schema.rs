use serde::Serialize;
use serde_json::{Map, Value};

/// Why a single field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Missing,
    StringType,
    FloatType,
    IntType,
    ModelType,
    JsonInvalid,
    Forbidden,
    FiniteNumber,
}

impl FieldErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            FieldErrorKind::Missing => "Field required",
            FieldErrorKind::StringType => "Input should be a valid string",
            FieldErrorKind::FloatType => "Input should be a valid number",
            FieldErrorKind::IntType => "Input should be a valid integer",
            FieldErrorKind::ModelType => "Input should be a valid dictionary or object",
            FieldErrorKind::JsonInvalid => "JSON decode error",
            FieldErrorKind::Forbidden => "Field is assigned by the store and cannot be set",
            FieldErrorKind::FiniteNumber => "Input should be a finite number",
        }
    }
}

/// One offending field. `field` is `None` when the whole input is at fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Option<String>,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: Some(field.into()),
            kind,
        }
    }

    pub fn body(kind: FieldErrorKind) -> Self {
        Self { field: None, kind }
    }
}

/// Input that could not be turned into a record. Always names every offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid fields: {}", self.fields().join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self::new(vec![error])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Offending field names in the order they were found (`body` for input-level errors)
    pub fn fields(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| e.field.clone().unwrap_or_else(|| "body".to_string()))
            .collect()
    }
}

/// Reads typed fields out of an untyped JSON object, collecting every failure
/// instead of stopping at the first one.
pub struct FieldReader<'a> {
    input: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub fn new(input: &'a Map<String, Value>) -> Self {
        Self {
            input,
            errors: Vec::new(),
        }
    }

    /// `null` counts as absent
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.input.get(field).filter(|v| !v.is_null())
    }

    fn fail(&mut self, field: &str, kind: FieldErrorKind) {
        self.errors.push(FieldError::new(field, kind));
    }

    /// Empty string on failure; the failure is reported by `finish`
    pub fn required_str(&mut self, field: &str) -> String {
        match self.present(field) {
            None => {
                self.fail(field, FieldErrorKind::Missing);
                String::new()
            }
            Some(value) => self.as_str(field, value).unwrap_or_default(),
        }
    }

    pub fn optional_str(&mut self, field: &str) -> Option<String> {
        self.present(field).and_then(|value| self.as_str(field, value))
    }

    /// Zero on failure; the failure is reported by `finish`
    pub fn required_f64(&mut self, field: &str) -> f64 {
        match self.present(field) {
            None => {
                self.fail(field, FieldErrorKind::Missing);
                0.0
            }
            Some(value) => self.as_f64(field, value).unwrap_or_default(),
        }
    }

    pub fn optional_f64(&mut self, field: &str) -> Option<f64> {
        self.present(field).and_then(|value| self.as_f64(field, value))
    }

    pub fn optional_i64(&mut self, field: &str) -> Option<i64> {
        self.present(field).and_then(|value| {
            let parsed = value.as_i64();
            if parsed.is_none() {
                self.fail(field, FieldErrorKind::IntType);
            }
            parsed
        })
    }

    fn as_str(&mut self, field: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.fail(field, FieldErrorKind::StringType);
                None
            }
        }
    }

    fn as_f64(&mut self, field: &str, value: &Value) -> Option<f64> {
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.fail(field, FieldErrorKind::FloatType);
                None
            }
        }
    }

    /// Ok only when no field failed
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

/// Fail for every present value that is NaN or infinite; JSON would carry those as `null`
pub fn require_finite(fields: &[(&str, Option<f64>)]) -> Result<(), ValidationError> {
    let errors: Vec<FieldError> = fields
        .iter()
        .filter(|(_, value)| value.is_some_and(|v| !v.is_finite()))
        .map(|(field, _)| FieldError::new(*field, FieldErrorKind::FiniteNumber))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(errors))
    }
}

/// Serialize a record and drop every `null`, so absent fields never reach the store
pub fn to_insert_row<T: Serialize>(record: &T) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(record)? {
        Value::Object(mut map) => {
            map.retain(|_, v| !v.is_null());
            Ok(map)
        }
        other => Err(serde::ser::Error::custom(format!(
            "record serialized to {} instead of an object",
            json_type_name(&other)
        ))),
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
