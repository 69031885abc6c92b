use std::path::Path;

use shapefile::dbase::{FieldValue, Record};

use crate::error::TagError;

/// Numeric view of a dBASE value. Character fields holding a number are accepted,
/// since Cube and ArcGIS exports disagree on the type of id columns.
pub(crate) fn numeric_value(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Numeric(n) => *n,
        FieldValue::Float(f) => f.map(f64::from),
        FieldValue::Integer(i) => Some(f64::from(*i)),
        FieldValue::Double(d) => Some(*d),
        FieldValue::Currency(c) => Some(*c),
        FieldValue::Character(Some(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Get a required numeric field of record `index` in `layer`.
pub(crate) fn numeric_field(layer: &Path, record: &Record, index: usize, field: &str) -> Result<f64, TagError> {
    let value = record.get(field)
        .ok_or_else(|| TagError::MissingField {
            layer: layer.display().to_string(),
            field: field.to_string(),
            record: index,
        })?;
    numeric_value(value)
        .filter(|n| n.is_finite())
        .ok_or_else(|| TagError::InvalidField {
            layer: layer.display().to_string(),
            field: field.to_string(),
            record: index,
            expected: "number",
        })
}

/// Get a required integral field (ids, modes) of record `index` in `layer`.
pub(crate) fn integer_field(layer: &Path, record: &Record, index: usize, field: &str) -> Result<i64, TagError> {
    let n = numeric_field(layer, record, index, field)?;
    if n.fract() != 0.0 {
        return Err(TagError::InvalidField {
            layer: layer.display().to_string(),
            field: field.to_string(),
            record: index,
            expected: "integer",
        });
    }
    Ok(n as i64)
}

/// Get a field that must exist but may be blank; blank values read as `None`.
pub(crate) fn nullable_numeric_field(layer: &Path, record: &Record, index: usize, field: &str) -> Result<Option<f64>, TagError> {
    record.get(field)
        .map(numeric_value)
        .ok_or_else(|| TagError::MissingField {
            layer: layer.display().to_string(),
            field: field.to_string(),
            record: index,
        })
}

/// Get an optional numeric field; blank and missing values read as `None`.
pub(crate) fn optional_numeric_field(record: &Record, field: &str) -> Option<f64> {
    record.get(field).and_then(numeric_value)
}
