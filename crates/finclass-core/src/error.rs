use thiserror::Error;

/// Errors raised while building a [`FeatureSchema`](crate::FeatureSchema).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Feature schema is empty")]
    Empty,

    #[error("Feature positions must be contiguous from 0, found gap at {0}")]
    NonContiguous(usize),

    #[error("Duplicate feature name: {0}")]
    DuplicateName(String),
}

/// Client-caused request failures. Field names are always external display names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The request body was valid JSON but not an object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// Every absent field, in schema order.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// A present field that could not be read as a finite number.
    #[error("Field '{field}' must be a finite number")]
    InvalidType { field: String },
}

/// Server-side failures during scaling or model evaluation.
///
/// These never describe a caller mistake: the input vector has already been
/// validated by the time any artifact is invoked.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Scaler failed: {0}")]
    Scaler(String),

    #[error("Model evaluation failed: {0}")]
    Model(String),

    #[error("{stage} shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Failure to map a class index back to its label.
///
/// Never reaches the caller; the dispatcher turns it into a placeholder label.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Class index {index} out of range for {len} known classes")]
    OutOfRange { index: usize, len: usize },

    /// For [`LabelEncoder`](crate::LabelEncoder) implementations that override
    /// `decode` with a lookup that can fail for reasons other than range, e.g.
    /// an encoder backed by an external mapping table. The bundled class-list
    /// encoder only ever returns `OutOfRange`.
    #[error("Label encoder is corrupt: {0}")]
    Corrupt(String),
}
