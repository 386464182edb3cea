//! Staged cash-flow pipeline for a single property

use super::mortgage::{interest_only_payment, AmortizingLoan};
use super::result::{CalculationResult, CashflowReport, Metric};
use crate::assumptions::Assumptions;
use crate::error::CalculationError;
use crate::property::{PropertyFacts, ResolvedFacts};
use serde_json::{Map, Value};

/// Share of the offer price financed by the first mortgage
pub const FIRST_MORTGAGE_LOAN_TO_PRICE: f64 = 0.80;

/// Longest amortization accepted for the second mortgage
pub const SECOND_MORTGAGE_MAX_MONTHS: f64 = 360.0;

/// Payments made in the first holding year
const PAYMENTS_PER_YEAR: f64 = 12.0;

/// Loans resolved in the financing stage and reused for year-1 equity
#[derive(Debug, Clone, Copy)]
struct Loans {
    first: AmortizingLoan,
    second: AmortizingLoan,
}

/// Cash-flow calculator bound to one set of assumptions
///
/// Holds no mutable state, so a single instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct CashflowCalculator {
    assumptions: Assumptions,
}

impl CashflowCalculator {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.assumptions
    }

    /// Run the full pipeline
    ///
    /// Fails only when the arithmetic produces a NaN or infinite output, which
    /// happens when a non-finite value reaches the inputs.
    pub fn calculate(&self, facts: &PropertyFacts) -> Result<CalculationResult, CalculationError> {
        let facts = facts.resolve();
        log::info!(
            "Calculating cashflow: offer={:.2}, units={}, gross_rents={:.2}",
            facts.offer_price,
            facts.number_of_units,
            facts.gross_rents
        );

        let mut result = CalculationResult::default();

        self.calculate_purchase(&facts, &mut result);
        let loans = self.calculate_financing(&facts, &mut result);
        self.calculate_income(&facts, &mut result);
        self.calculate_expenses(&facts, &mut result);
        self.calculate_cash_requirements(&mut result);
        self.calculate_profit(&facts, &mut result);
        self.calculate_ratios(&facts, &mut result);
        self.calculate_returns(&facts, &loans, &mut result);

        if let Some(field) = result.first_non_finite() {
            return Err(CalculationError::NonFinite { field });
        }

        log::info!(
            "Calculation complete: NOI={:.2}, cashflow per unit={:.2}",
            result.net_operating_income,
            result.cashflow_per_unit
        );
        Ok(result)
    }

    /// Run the pipeline, degrading any failure to the minimal fallback report
    pub fn calculate_or_fallback(&self, facts: &PropertyFacts) -> CashflowReport {
        match self.calculate(facts) {
            Ok(result) => CashflowReport::Complete(result),
            Err(e) => {
                log::error!("Cashflow calculation failed, returning fallback: {}", e);
                CashflowReport::Fallback
            }
        }
    }

    /// Offer price plus every acquisition cost
    fn calculate_purchase(&self, facts: &ResolvedFacts, result: &mut CalculationResult) {
        result.real_purchase_price = facts.offer_price + self.assumptions.acquisition.total();
        log::debug!("Real purchase price: {:.2}", result.real_purchase_price);
    }

    /// Monthly payments for each loan tranche and cash left to fund
    fn calculate_financing(&self, facts: &ResolvedFacts, result: &mut CalculationResult) -> Loans {
        let terms = &self.assumptions.financing;

        result.first_mortgage_principle_borrowed = facts.offer_price * FIRST_MORTGAGE_LOAN_TO_PRICE;
        result.first_mortgage_total_principle =
            result.first_mortgage_principle_borrowed * (1.0 + terms.first_mtg_cmhc_fee / 100.0);

        let first = AmortizingLoan::from_annual(
            result.first_mortgage_total_principle,
            terms.first_mtg_interest_rate,
            terms.first_mtg_amortization_period,
        );
        let second = AmortizingLoan::from_annual(
            terms.second_mtg_principle,
            terms.second_mtg_interest_rate,
            terms.second_mtg_amortization,
        )
        .with_max_months(SECOND_MORTGAGE_MAX_MONTHS);

        result.first_mortgage_monthly_payment = first.monthly_payment();
        result.second_mortgage_monthly_payment = second.monthly_payment();
        result.interest_only_monthly_payment =
            interest_only_payment(terms.interest_only_principle, terms.interest_only_rate);

        result.cash_required_after_financing = result.real_purchase_price
            - result.first_mortgage_principle_borrowed
            - terms.second_mtg_principle
            - terms.interest_only_principle;

        log::debug!(
            "Monthly payments: first={:.2}, second={:.2}, interest-only={:.2}",
            result.first_mortgage_monthly_payment,
            result.second_mortgage_monthly_payment,
            result.interest_only_monthly_payment
        );

        Loans { first, second }
    }

    fn calculate_income(&self, facts: &ResolvedFacts, result: &mut CalculationResult) {
        result.total_income = facts.gross_rents + self.assumptions.income.total();
        result.vacancy_loss = self.assumptions.market.vacancy_rate / 100.0 * result.total_income;
        result.effective_gross_income = result.total_income - result.vacancy_loss;
        log::debug!("Effective gross income: {:.2}", result.effective_gross_income);
    }

    /// Annual operating expenses, then NOI
    fn calculate_expenses(&self, facts: &ResolvedFacts, result: &mut CalculationResult) {
        let market = &self.assumptions.market;
        let expenses = &self.assumptions.expenses;
        let units = f64::from(facts.number_of_units);
        let vacancy = market.vacancy_rate / 100.0;
        // expected turnover events per year
        let turnovers = units * 12.0 * vacancy;

        result.repairs_cost = facts.gross_rents * expenses.repairs_rate / 100.0;
        result.management = market.management_rate / 100.0 * result.total_income;
        result.advertising = turnovers / 2.0 * market.advertising_cost_per_vacancy;
        result.pest_control = if facts.number_of_units < 2 { 140.0 * units } else { 70.0 * units };
        result.security = turnovers / 1.5 * 50.0;
        result.evictions = turnovers / 2.0 / 10.0 * 1000.0;

        result.total_expenses = facts.property_taxes
            + facts.offer_price * facts.insurance_rate
            + result.repairs_cost
            + expenses.pass_through_total()
            + result.management
            + result.advertising
            + result.pest_control
            + result.security
            + result.evictions;

        result.net_operating_income = result.effective_gross_income - result.total_expenses;
        log::debug!(
            "Total expenses: {:.2}, NOI: {:.2}",
            result.total_expenses,
            result.net_operating_income
        );
    }

    fn calculate_cash_requirements(&self, result: &mut CalculationResult) {
        let cash = &self.assumptions.cash;
        result.cash_required_to_close = result.cash_required_after_financing - cash.deposit_with_offer;
        result.total_cash_required =
            result.cash_required_to_close + cash.deposit_with_offer - cash.less_pro_ration_of_rents;
        log::debug!("Total cash required: {:.2}", result.total_cash_required);
    }

    fn calculate_profit(&self, facts: &ResolvedFacts, result: &mut CalculationResult) {
        let monthly_debt = result.first_mortgage_monthly_payment
            + result.second_mortgage_monthly_payment
            + result.interest_only_monthly_payment
            + self.assumptions.financing.other_monthly_financing;

        result.debt_servicing_costs = monthly_debt * 12.0;
        result.annual_profit_or_loss = result.net_operating_income - result.debt_servicing_costs;
        result.monthly_profit_or_loss = result.annual_profit_or_loss / 12.0;
        result.cashflow_per_unit = result.monthly_profit_or_loss / f64::from(facts.number_of_units);
        log::debug!(
            "Debt service: {:.2}, annual profit: {:.2}",
            result.debt_servicing_costs,
            result.annual_profit_or_loss
        );
    }

    /// Leverage, cap rate and coverage ratios
    fn calculate_ratios(&self, facts: &ResolvedFacts, result: &mut CalculationResult) {
        let second_principal = self.assumptions.financing.second_mtg_principle;
        let over = |numerator: f64, denominator: f64| {
            if denominator > 0.0 {
                numerator / denominator
            } else {
                0.0
            }
        };

        result.first_mortgage_ltv = over(result.first_mortgage_principle_borrowed, facts.fair_market_value);
        result.first_mortgage_ltpp = over(result.first_mortgage_principle_borrowed, facts.offer_price);
        result.second_mortgage_ltv = over(second_principal, facts.fair_market_value);
        result.second_mortgage_ltpp = over(second_principal, facts.offer_price);
        result.cap_rate_on_pp = over(result.net_operating_income, facts.offer_price);
        result.cap_rate_on_fmv = over(result.net_operating_income, facts.fair_market_value);
        result.average_rent = facts.gross_rents / f64::from(facts.number_of_units) / 12.0;
        result.grm = over(facts.offer_price, facts.gross_rents);
        result.dcr = debt_coverage(result.net_operating_income, result.debt_servicing_costs);
        result.expense_to_income_ratio = over(result.total_expenses, result.total_income);
    }

    /// Year-1 returns on the cash invested
    ///
    /// Every return is `Infinite` when no positive cash is invested.
    fn calculate_returns(&self, facts: &ResolvedFacts, loans: &Loans, result: &mut CalculationResult) {
        let invested = result.total_cash_required;
        if invested <= 0.0 {
            log::warn!("Total cash required is {:.2}; returns are unbounded", invested);
            result.cash_on_cash_roi = Metric::Infinite;
            result.equity_roi = Metric::Infinite;
            result.appreciation_roi = Metric::Infinite;
            result.total_roi = Metric::Infinite;
            result.forced_appreciation_roi = Metric::Infinite;
            return;
        }

        // Principal repaid is measured against the amount borrowed, not the
        // insured total, so a mortgage insurance premium reduces equity gained.
        let first_balance = loans.first.balance_after(PAYMENTS_PER_YEAR);
        let second_balance = loans.second.balance_after(PAYMENTS_PER_YEAR);
        let equity_gained = (result.first_mortgage_principle_borrowed - first_balance)
            + (loans.second.principal - second_balance);

        let fmv = facts.fair_market_value;
        let appreciation = fmv * (1.0 + self.assumptions.market.annual_appreciation_rate / 100.0) - fmv;

        let cash_on_cash = result.annual_profit_or_loss / invested;
        let equity = equity_gained / invested;
        let appreciation = appreciation / invested.abs();

        result.cash_on_cash_roi = Metric::Value(cash_on_cash);
        result.equity_roi = Metric::Value(equity);
        result.appreciation_roi = Metric::Value(appreciation);
        result.total_roi = Metric::Value(cash_on_cash + equity + appreciation);
        result.forced_appreciation_roi =
            Metric::Value((fmv - result.real_purchase_price) / invested.abs());
    }
}

/// Debt coverage ratio
///
/// The non-positive check runs before the zero check, so zero and any positive
/// debt service both report `NoDebtToCover`; only a negative service yields a ratio.
fn debt_coverage(net_operating_income: f64, debt_servicing_costs: f64) -> Metric {
    if -debt_servicing_costs <= 0.0 {
        Metric::NoDebtToCover
    } else if debt_servicing_costs == 0.0 {
        Metric::Unknown
    } else {
        Metric::Value(net_operating_income / -debt_servicing_costs)
    }
}

/// Calculate with resolved assumptions
pub fn calculate(
    facts: &PropertyFacts,
    assumptions: &Assumptions,
) -> Result<CalculationResult, CalculationError> {
    CashflowCalculator::new(assumptions.clone()).calculate(facts)
}

/// Calculate from a raw user-input mapping
///
/// Assumption resolution errors and pipeline failures both degrade to the
/// fallback report.
pub fn calculate_from_mapping(facts: &PropertyFacts, user_inputs: &Map<String, Value>) -> CashflowReport {
    match Assumptions::from_mapping(user_inputs) {
        Ok(assumptions) => CashflowCalculator::new(assumptions).calculate_or_fallback(facts),
        Err(e) => {
            log::error!(
                "Cashflow calculation failed, returning fallback: {}",
                CalculationError::from(e)
            );
            CashflowReport::Fallback
        }
    }
}
