//! Typed errors for input validation.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal data problems detected while loading or joining layers.
/// I/O failures are reported through `anyhow` context instead.
#[derive(Debug, Error)]
pub enum TagError {
    /// Two layers declare different coordinate reference systems.
    #[error("coordinate reference mismatch: {} uses {left_crs} but {} uses {right_crs}", left.display(), right.display())]
    CrsMismatch {
        left: PathBuf,
        left_crs: String,
        right: PathBuf,
        right_crs: String,
    },

    /// An identifier that must be unique appears more than once.
    #[error("duplicate {kind} id {id} in {layer}")]
    DuplicateId {
        layer: String,
        kind: &'static str,
        id: String,
    },

    /// A required attribute is absent from a record.
    #[error("missing field {field} in record {record} of {layer}")]
    MissingField {
        layer: String,
        field: String,
        record: usize,
    },

    /// An attribute is present but cannot be read as the expected type.
    #[error("field {field} in record {record} of {layer} is not a valid {expected}")]
    InvalidField {
        layer: String,
        field: String,
        record: usize,
        expected: &'static str,
    },

    /// A record holds a different geometry type than the layer requires.
    #[error("record {record} of {layer} is a {found} shape, expected {expected}")]
    UnexpectedShape {
        layer: String,
        record: usize,
        expected: &'static str,
        found: String,
    },

    /// The run configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
