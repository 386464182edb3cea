//! Scenario runner for batch cash-flow analysis
//!
//! Resolves assumptions once, then runs many properties or many assumption
//! variants without re-reading files.

use crate::assumptions::{AssumptionStore, Assumptions, UserId};
use crate::calculator::{CashflowCalculator, CashflowReport};
use crate::error::{AssumptionError, PropertyError};
use crate::property::{PropertyFactProvider, PropertyFacts};
use rayon::prelude::*;
use std::path::Path;

/// Pre-loaded runner for analysing many properties
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// let reports = runner.run_batch(&properties);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    calculator: CashflowCalculator,
}

impl ScenarioRunner {
    /// Create runner with the built-in default assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner from the default assumptions file
    pub fn from_csv() -> Result<Self, AssumptionError> {
        Ok(Self::with_assumptions(Assumptions::from_csv()?))
    }

    /// Create runner from a specific CSV or JSON assumptions file
    pub fn from_path(path: &Path) -> Result<Self, AssumptionError> {
        Ok(Self::with_assumptions(Assumptions::from_path(path)?))
    }

    /// Create runner with the profile a store holds for `user`
    pub fn for_user(store: &impl AssumptionStore, user: Option<UserId>) -> Self {
        Self::with_assumptions(store.assumptions_for(user))
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            calculator: CashflowCalculator::new(assumptions),
        }
    }

    /// Analyse a single property
    pub fn run(&self, facts: &PropertyFacts) -> CashflowReport {
        self.calculator.calculate_or_fallback(facts)
    }

    /// Analyse a listing looked up through a fact provider
    pub fn run_listing(
        &self,
        provider: &impl PropertyFactProvider,
        property_id: &str,
    ) -> Result<CashflowReport, PropertyError> {
        Ok(self.run(&provider.facts_for(property_id)?))
    }

    /// Analyse many properties in parallel; output order matches input order
    pub fn run_batch(&self, properties: &[PropertyFacts]) -> Vec<CashflowReport> {
        properties.par_iter().map(|facts| self.run(facts)).collect()
    }

    /// Analyse one property under several assumption sets
    pub fn run_scenarios(&self, facts: &PropertyFacts, scenarios: &[Assumptions]) -> Vec<CashflowReport> {
        scenarios
            .par_iter()
            .map(|assumptions| CashflowCalculator::new(assumptions.clone()).calculate_or_fallback(facts))
            .collect()
    }

    /// Base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        self.calculator.assumptions()
    }

    /// Mutable base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        self.calculator.assumptions_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::InMemoryAssumptionStore;
    use crate::property::InMemoryFactProvider;
    use approx::assert_relative_eq;

    fn duplex() -> PropertyFacts {
        PropertyFacts {
            property_id: Some("M1".to_string()),
            fair_market_value: Some(500_000.0),
            ..PropertyFacts::new(500_000.0, 2, 48_000.0)
        }
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let properties: Vec<_> = (1..=20)
            .map(|units| PropertyFacts::new(100_000.0 * units as f64, units, 12_000.0 * units as f64))
            .collect();

        let reports = runner.run_batch(&properties);
        assert_eq!(reports.len(), 20);
        for (facts, report) in properties.iter().zip(&reports) {
            assert_eq!(report, &runner.run(facts));
        }
    }

    #[test]
    fn test_scenarios_higher_vacancy_lowers_cashflow() {
        let runner = ScenarioRunner::new();
        let scenarios: Vec<_> = [2.0, 5.0, 10.0]
            .iter()
            .map(|&vacancy| {
                let mut assumptions = runner.assumptions().clone();
                assumptions.market.vacancy_rate = vacancy;
                assumptions
            })
            .collect();

        let reports = runner.run_scenarios(&duplex(), &scenarios);
        assert_eq!(reports.len(), 3);
        assert!(reports[0].cashflow_per_unit() > reports[1].cashflow_per_unit());
        assert!(reports[1].cashflow_per_unit() > reports[2].cashflow_per_unit());
        assert_relative_eq!(reports[1].cashflow_per_unit(), 319.20, epsilon = 0.01);
    }

    #[test]
    fn test_run_listing() {
        let runner = ScenarioRunner::new();
        let provider = InMemoryFactProvider::from_properties(vec![duplex()]);

        let report = runner.run_listing(&provider, "M1").unwrap();
        assert!(!report.is_fallback());
        assert!(matches!(
            runner.run_listing(&provider, "missing"),
            Err(PropertyError::NotFound(_))
        ));
    }

    #[test]
    fn test_for_user_uses_saved_profile() {
        let mut store = InMemoryAssumptionStore::new();
        let mut profile = Assumptions::default();
        profile.market.management_rate = 0.0;
        store.save(7, profile.clone());

        assert_eq!(ScenarioRunner::for_user(&store, Some(7)).assumptions(), &profile);
        assert_eq!(ScenarioRunner::for_user(&store, None).assumptions(), &Assumptions::default());
    }

    #[test]
    fn test_assumptions_mut() {
        let mut runner = ScenarioRunner::new();
        let base = runner.run(&duplex()).cashflow_per_unit();
        runner.assumptions_mut().financing.other_monthly_financing = 200.0;
        // 200/month of extra debt split over two units
        assert_relative_eq!(runner.run(&duplex()).cashflow_per_unit(), base - 100.0, epsilon = 1e-9);
    }
}
