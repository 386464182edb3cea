//! Rental Cashflow - Investment analysis engine for rental properties
//!
//! This library provides:
//! - Property fact extraction from listing payloads and CSV exports
//! - Typed investor assumptions with documented defaults and per-user profiles
//! - Amortizing and interest-only loan math
//! - Cash flow, NOI, cap rate, DCR and year-1 ROI calculations
//! - Parallel batch analysis across properties or assumption scenarios

pub mod error;
pub mod property;
pub mod assumptions;
pub mod calculator;
pub mod scenario;

// Re-export commonly used types
pub use error::{AssumptionError, CalculationError, PropertyError};
pub use property::{PropertyFacts, PropertyFactProvider, InMemoryFactProvider};
pub use assumptions::{Assumptions, AssumptionStore, InMemoryAssumptionStore};
pub use calculator::{calculate, calculate_from_mapping, CashflowCalculator, CalculationResult, CashflowReport, Metric};
pub use scenario::ScenarioRunner;
