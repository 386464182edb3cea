//! Error types shared across the crate

use thiserror::Error;

/// Failures while loading or looking up property facts
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("Property not found: {0}")]
    NotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while resolving a user-input mapping into typed assumptions
#[derive(Debug, Error)]
pub enum AssumptionError {
    #[error("Assumption '{key}' must be numeric, got {value}")]
    NotNumeric { key: String, value: String },

    #[error("Unknown assumption key: {0}")]
    UnknownKey(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures inside the cash-flow pipeline
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("Invalid assumptions: {0}")]
    Assumption(#[from] AssumptionError),

    #[error("Non-finite value produced for '{field}'")]
    NonFinite { field: &'static str },
}
