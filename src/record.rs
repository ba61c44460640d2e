//! Itinerary records and the normalizer that makes every record fully keyed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Fields every itinerary carries after normalization, in CSV column order.
pub const REQUIRED_FIELDS: [&str; 5] = ["guid", "createdAt", "name", "itineraryId", "updatedAt"];

/// One itinerary as sent by the provider. Unknown fields are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary(Map<String, Value>);

impl Itinerary {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    fn fill_missing(&mut self, required: &[&str]) {
        for field in required {
            if !self.0.contains_key(*field) {
                self.0.insert(field.to_string(), Value::Null);
            }
        }
    }
}

pub fn normalize(itineraries: Value) -> Result<Vec<Itinerary>> {
    normalize_with(itineraries, &REQUIRED_FIELDS)
}

/// Checks the payload is a list of objects and adds a `null` for every
/// `required` field a record lacks. Order and length are preserved.
pub fn normalize_with(itineraries: Value, required: &[&str]) -> Result<Vec<Itinerary>> {
    let items = match itineraries {
        Value::Array(items) => items,
        other => {
            return Err(Error::Validation(format!(
                "Expected a list of itineraries, got {}",
                kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => {
                let mut itinerary = Itinerary(fields);
                itinerary.fill_missing(required);
                Ok(itinerary)
            }
            other => Err(Error::Validation(format!(
                "Itinerary at index {} is not an object, got {}",
                index,
                kind(&other)
            ))),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
