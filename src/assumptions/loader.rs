//! File-based assumption loader
//!
//! Two formats are accepted: a `Key,Value` CSV (one camelCase key per row) and a
//! flat JSON object in the same shape the API accepts.

use super::Assumptions;
use crate::error::AssumptionError;
use serde_json::{Map, Value};
use std::fs::File;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File name of the default assumption set inside [`DEFAULT_ASSUMPTIONS_PATH`]
pub const DEFAULT_ASSUMPTIONS_FILE: &str = "default.csv";

/// Load assumptions from a `Key,Value` CSV
///
/// Unlike API mappings, a CSV is hand-maintained configuration, so unknown keys
/// are rejected rather than ignored.
pub fn load_assumptions_csv(path: &Path) -> Result<Assumptions, AssumptionError> {
    let file = File::open(path)?;
    load_assumptions_from_reader(file)
}

/// Load a `Key,Value` CSV from any reader
pub fn load_assumptions_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Assumptions, AssumptionError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut assumptions = Assumptions::default();

    for result in reader.records() {
        let record = result?;
        let key = record.get(0).unwrap_or("").trim();
        let raw = record.get(1).unwrap_or("").trim();
        if key.is_empty() {
            continue;
        }
        let value: f64 = raw.parse().map_err(|_| AssumptionError::NotNumeric {
            key: key.to_string(),
            value: raw.to_string(),
        })?;
        assumptions.set(key, value)?;
    }

    Ok(assumptions)
}

/// Load assumptions from a flat JSON object
pub fn load_assumptions_json(path: &Path) -> Result<Assumptions, AssumptionError> {
    let file = File::open(path)?;
    let mapping: Map<String, Value> = serde_json::from_reader(file)?;
    Assumptions::from_mapping(&mapping)
}
