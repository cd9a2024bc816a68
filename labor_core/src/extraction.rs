//! The result of one extraction pass.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::field::{Field, FieldValue};

/// Found values plus the companion list of fields that could not be determined.
///
/// Every field is classified at most once: the first `record` for a field
/// wins and later calls are ignored. [`Extraction::finish`] sweeps any field
/// that was never recorded into the not-found list, so a finished extraction
/// classifies each field of [`Field::ALL`] exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    found: BTreeMap<Field, FieldValue>,
    not_found: Vec<Field>,
}

impl Extraction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `field`. Empty values count as not found.
    pub fn record(&mut self, field: Field, value: Option<FieldValue>) {
        if self.is_classified(field) {
            return;
        }
        match value {
            Some(value) if !value.is_empty() => {
                self.found.insert(field, value);
            }
            _ => self.not_found.push(field),
        }
    }

    /// Record every field that has not been classified yet as not found.
    #[must_use]
    pub fn finish(mut self) -> Self {
        for field in Field::ALL {
            if !self.is_classified(field) {
                self.not_found.push(field);
            }
        }
        self
    }

    #[must_use]
    pub fn is_classified(&self, field: Field) -> bool {
        self.found.contains_key(&field) || self.not_found.contains(&field)
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.found.get(&field)
    }

    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    #[must_use]
    pub fn number(&self, field: Field) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    #[must_use]
    pub fn flag(&self, field: Field) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_flag)
    }

    #[must_use]
    pub fn is_found(&self, field: Field) -> bool {
        self.found.contains_key(&field)
    }

    /// Found fields in extraction order.
    pub fn found(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.found.iter().map(|(field, value)| (*field, value))
    }

    /// Fields that could not be determined, in classification order.
    #[must_use]
    pub fn not_found(&self) -> &[Field] {
        &self.not_found
    }

    /// The found fields as a flat JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.found
                .iter()
                .map(|(field, value)| {
                    (
                        field.as_str().to_string(),
                        serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
                    )
                })
                .collect(),
        )
    }
}
