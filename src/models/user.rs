use serde::Serialize;
use serde_json::{Map, Value};

use super::schema::{FieldReader, ValidationError};
use super::Model;

/// A user profile, stored in the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub age: Option<i64>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            age: None,
        }
    }
}

impl Model for User {
    const TABLE: &'static str = "users";

    fn from_object(input: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(input);
        let id = reader.optional_i64("id");
        let name = reader.required_str("name");
        let description = reader.optional_str("description");
        let age = reader.optional_i64("age");
        reader.finish()?;

        Ok(Self {
            id,
            name,
            description,
            age,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}
