//! Calculation output structures

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A ratio that may be unbounded or not computable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    /// No (positive) cash invested, so the return is unbounded
    Infinite,
    /// No debt service to cover
    NoDebtToCover,
    /// Not computable from the inputs
    Unknown,
}

impl Metric {
    /// Numeric value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Metric::Infinite)
    }

    /// Sentinel label used in serialized output
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Metric::Value(_) => None,
            Metric::Infinite => Some("Infinite"),
            Metric::NoDebtToCover => Some("No Debt to Cover"),
            Metric::Unknown => Some("Unknown"),
        }
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Metric::Value(value)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.label()) {
            (Metric::Value(v), _) => match f.precision() {
                Some(precision) => write!(f, "{:.*}", precision, v),
                None => write!(f, "{}", v),
            },
            // precision applies to numbers only
            (_, Some(label)) => f.write_str(label),
            (_, None) => Ok(()),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Value(v) => serializer.serialize_f64(*v),
            other => serializer.serialize_str(other.label().unwrap_or_default()),
        }
    }
}

/// Display key of the only field kept by the degraded result
pub const CASHFLOW_PER_UNIT_KEY: &str = "Cashflow per Unit per Month";

/// Full cash-flow analysis for one property
///
/// Monetary figures are annual unless the name says monthly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationResult {
    // Purchase
    pub real_purchase_price: f64,

    // Financing (monthly)
    pub first_mortgage_principle_borrowed: f64,
    /// Including mortgage insurance premium
    pub first_mortgage_total_principle: f64,
    pub first_mortgage_monthly_payment: f64,
    pub second_mortgage_monthly_payment: f64,
    pub interest_only_monthly_payment: f64,
    pub cash_required_after_financing: f64,

    // Income
    pub total_income: f64,
    pub vacancy_loss: f64,
    pub effective_gross_income: f64,

    // Operating expenses
    pub repairs_cost: f64,
    pub management: f64,
    pub advertising: f64,
    pub pest_control: f64,
    pub security: f64,
    pub evictions: f64,
    pub total_expenses: f64,

    pub net_operating_income: f64,

    // Cash requirements
    pub cash_required_to_close: f64,
    pub total_cash_required: f64,

    // Cashflow summary
    pub debt_servicing_costs: f64,
    pub annual_profit_or_loss: f64,
    pub monthly_profit_or_loss: f64,
    pub cashflow_per_unit: f64,

    // Quick analysis
    pub first_mortgage_ltv: f64,
    pub first_mortgage_ltpp: f64,
    pub second_mortgage_ltv: f64,
    pub second_mortgage_ltpp: f64,
    pub cap_rate_on_pp: f64,
    pub cap_rate_on_fmv: f64,
    /// Monthly rent per unit
    pub average_rent: f64,
    pub grm: f64,
    pub dcr: Metric,
    pub cash_on_cash_roi: Metric,
    pub equity_roi: Metric,
    pub appreciation_roi: Metric,
    pub total_roi: Metric,
    pub forced_appreciation_roi: Metric,
    pub expense_to_income_ratio: f64,
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Value(0.0)
    }
}

impl CalculationResult {
    /// All outputs under their display keys, in report order
    ///
    /// "Operating Expenses" repeats total expenses in the cashflow summary block.
    pub fn entries(&self) -> Vec<(&'static str, Metric)> {
        vec![
            ("Real Purchase Price", self.real_purchase_price.into()),
            ("First Mortgage Principle Borrowed", self.first_mortgage_principle_borrowed.into()),
            ("First Mortgage Total Principle", self.first_mortgage_total_principle.into()),
            ("First Mortgage Total Monthly Payment", self.first_mortgage_monthly_payment.into()),
            ("Second Mortgage Total Monthly Payment", self.second_mortgage_monthly_payment.into()),
            ("Interest Only Total Monthly Payment", self.interest_only_monthly_payment.into()),
            ("Cash Required to Close After Financing", self.cash_required_after_financing.into()),
            ("Total Income", self.total_income.into()),
            ("Vacancy Loss Percentage", self.vacancy_loss.into()),
            ("Effective Gross Income", self.effective_gross_income.into()),
            ("Repairs Cost", self.repairs_cost.into()),
            ("Management", self.management.into()),
            ("Advertising", self.advertising.into()),
            ("Pest Control", self.pest_control.into()),
            ("Security", self.security.into()),
            ("Evictions", self.evictions.into()),
            ("Total Expenses", self.total_expenses.into()),
            ("Net Operating Income", self.net_operating_income.into()),
            ("Cash Required to Close", self.cash_required_to_close.into()),
            ("Total Cash Required", self.total_cash_required.into()),
            ("Operating Expenses", self.total_expenses.into()),
            ("Debt Servicing Costs", self.debt_servicing_costs.into()),
            ("Annual Profit or Loss", self.annual_profit_or_loss.into()),
            ("Total Monthly Profit or Loss", self.monthly_profit_or_loss.into()),
            (CASHFLOW_PER_UNIT_KEY, self.cashflow_per_unit.into()),
            ("First Mortgage LTV", self.first_mortgage_ltv.into()),
            ("First Mortgage LTPP", self.first_mortgage_ltpp.into()),
            ("Second Mortgage LTV", self.second_mortgage_ltv.into()),
            ("Second Mortgage LTPP", self.second_mortgage_ltpp.into()),
            ("Cap Rate on PP", self.cap_rate_on_pp.into()),
            ("Cap Rate on FMV", self.cap_rate_on_fmv.into()),
            ("Average Rent", self.average_rent.into()),
            ("GRM", self.grm.into()),
            ("DCR", self.dcr),
            ("Cash on Cash ROI", self.cash_on_cash_roi),
            ("Equity ROI after 1 Year", self.equity_roi),
            ("Appreciation ROI after 1 Year", self.appreciation_roi),
            ("Total ROI after 1 Year", self.total_roi),
            ("Forced App ROI after 1 Year", self.forced_appreciation_roi),
            ("Expense to Income Ratio", self.expense_to_income_ratio.into()),
        ]
    }

    /// First output that is NaN or infinite, if any
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|(_, metric)| matches!(metric.value(), Some(v) if !v.is_finite()))
            .map(|(key, _)| key)
    }
}

impl Serialize for CalculationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, metric) in &entries {
            map.serialize_entry(key, metric)?;
        }
        map.end()
    }
}

/// Outcome handed to presentation code
///
/// A failed calculation degrades to [`CashflowReport::Fallback`], which carries
/// only a zero cashflow per unit.
#[derive(Debug, Clone, PartialEq)]
pub enum CashflowReport {
    Complete(CalculationResult),
    Fallback,
}

impl CashflowReport {
    pub fn is_fallback(&self) -> bool {
        matches!(self, CashflowReport::Fallback)
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        match self {
            CashflowReport::Complete(result) => Some(result),
            CashflowReport::Fallback => None,
        }
    }

    pub fn cashflow_per_unit(&self) -> f64 {
        self.result().map(|r| r.cashflow_per_unit).unwrap_or(0.0)
    }

    /// Populated outputs under their display keys
    pub fn entries(&self) -> Vec<(&'static str, Metric)> {
        match self {
            CashflowReport::Complete(result) => result.entries(),
            CashflowReport::Fallback => vec![(CASHFLOW_PER_UNIT_KEY, Metric::Value(0.0))],
        }
    }
}

impl Serialize for CashflowReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CashflowReport::Complete(result) => result.serialize(serializer),
            CashflowReport::Fallback => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(CASHFLOW_PER_UNIT_KEY, &0.0)?;
                map.end()
            }
        }
    }
}
