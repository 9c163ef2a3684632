//! Core domain types for finclass.
//!
//! This crate holds everything that is independent of where artifacts come
//! from and how requests arrive:
//!
//! - [`FeatureSchema`] — the fixed, ordered list of model inputs
//! - [`validate`] — maps a raw JSON request onto a [`FeatureVector`]
//! - [`Scaler`], [`Classifier`], [`LabelEncoder`] — capability traits for the
//!   pre-trained artifacts
//! - [`PredictionResult`] — the per-request output
//!
//! # Example
//!
//! ```rust
//! use finclass_core::{validate, FeatureSchema, ValidationError};
//! use serde_json::json;
//!
//! let schema = FeatureSchema::financial();
//! let err = validate(&json!({ "Gaji": 5000000 }), &schema).unwrap_err();
//!
//! match err {
//!     ValidationError::MissingFields(fields) => assert_eq!(fields.len(), 14),
//!     other => panic!("unexpected error: {other}"),
//! }
//! ```

mod artifact;
mod error;
mod prediction;
mod schema;
mod validate;

pub use artifact::{Classifier, LabelEncoder, Scaler};
pub use error::{DecodeError, InferenceError, SchemaError, ValidationError};
pub use prediction::{PredictionResult, Probabilities};
pub use schema::{FeatureSchema, FeatureSpec, FINANCIAL_FEATURES};
pub use validate::{validate, FeatureVector};
