//! Cash-flow calculator: loan math, staged pipeline and result types

pub mod mortgage;
mod engine;
mod result;

pub use engine::{
    calculate, calculate_from_mapping, CashflowCalculator, FIRST_MORTGAGE_LOAN_TO_PRICE,
    SECOND_MORTGAGE_MAX_MONTHS,
};
pub use mortgage::AmortizingLoan;
pub use result::{CalculationResult, CashflowReport, Metric, CASHFLOW_PER_UNIT_KEY};
