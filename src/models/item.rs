use serde::Serialize;
use serde_json::{Map, Value};

use super::schema::{require_finite, FieldReader, ValidationError};
use super::Model;

/// An item for sale, stored in the `items` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: Option<f64>,
}

impl Item {
    /// A not-yet-persisted item with only the required fields set
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            price,
            tax: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tax(mut self, tax: f64) -> Self {
        self.tax = Some(tax);
        self
    }
}

impl Model for Item {
    const TABLE: &'static str = "items";

    fn from_object(input: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(input);
        let id = reader.optional_i64("id");
        let name = reader.required_str("name");
        let description = reader.optional_str("description");
        let price = reader.required_f64("price");
        let tax = reader.optional_f64("tax");
        reader.finish()?;

        Ok(Self {
            id,
            name,
            description,
            price,
            tax,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn check(&self) -> Result<(), ValidationError> {
        require_finite(&[("price", Some(self.price)), ("tax", self.tax)])
    }
}
