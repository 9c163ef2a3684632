//! Request validation: raw JSON object to canonical feature vector.

use serde_json::Value;

use crate::error::ValidationError;
use crate::schema::FeatureSchema;

/// Feature values in canonical schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Maps a raw request onto the schema.
///
/// Each entry is looked up by external display name, falling back to its
/// internal identifier. Absent fields are collected and reported together in
/// schema order; the first present but non-numeric field fails immediately.
/// Unknown keys are ignored.
pub fn validate(raw: &Value, schema: &FeatureSchema) -> Result<FeatureVector, ValidationError> {
    let Value::Object(fields) = raw else {
        return Err(ValidationError::NotAnObject);
    };

    let mut values = Vec::with_capacity(schema.len());
    let mut missing = Vec::new();

    for spec in schema.entries() {
        let Some(value) = fields
            .get(&spec.external_name)
            .or_else(|| fields.get(&spec.internal_id))
        else {
            missing.push(spec.external_name.clone());
            continue;
        };

        let number = coerce(value).ok_or_else(|| ValidationError::InvalidType {
            field: spec.external_name.clone(),
        })?;
        values.push(number);
    }

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    Ok(FeatureVector(values))
}

/// Numbers pass through; strings are parsed. Anything non-finite is rejected.
fn coerce(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    number.is_finite().then_some(number)
}
