//! Loan terms for the first mortgage, second mortgage and interest-only tranche

/// Financing assumptions; rates are whole-number percentages, periods in years
#[derive(Debug, Clone, PartialEq)]
pub struct FinancingTerms {
    /// First mortgage amortization period (years)
    pub first_mtg_amortization_period: f64,
    /// First mortgage interest rate (%)
    pub first_mtg_interest_rate: f64,
    /// Mortgage insurance premium added to the first mortgage principal (%)
    pub first_mtg_cmhc_fee: f64,
    pub second_mtg_principle: f64,
    /// Second mortgage interest rate (%)
    pub second_mtg_interest_rate: f64,
    /// Second mortgage amortization (years); capped at 30 years by the calculator
    pub second_mtg_amortization: f64,
    pub interest_only_principle: f64,
    /// Interest-only rate (%)
    pub interest_only_rate: f64,
    /// Any other monthly financing cost
    pub other_monthly_financing: f64,
}

impl Default for FinancingTerms {
    fn default() -> Self {
        Self {
            first_mtg_amortization_period: 30.0,
            first_mtg_interest_rate: 6.5,
            first_mtg_cmhc_fee: 0.0,
            second_mtg_principle: 0.0,
            second_mtg_interest_rate: 12.0,
            second_mtg_amortization: 9999.0, // effectively "max term"
            interest_only_principle: 0.0,
            interest_only_rate: 0.0,
            other_monthly_financing: 0.0,
        }
    }
}

impl FinancingTerms {
    pub(super) fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "firstMtgAmortizationPeriod" => Some(&mut self.first_mtg_amortization_period),
            "firstMtgInterestRate" => Some(&mut self.first_mtg_interest_rate),
            "firstMtgCMHCFee" => Some(&mut self.first_mtg_cmhc_fee),
            "secondMtgPrinciple" => Some(&mut self.second_mtg_principle),
            "secondMtgInterestRate" => Some(&mut self.second_mtg_interest_rate),
            "secondMtgAmortization" => Some(&mut self.second_mtg_amortization),
            "interestOnlyPrinciple" => Some(&mut self.interest_only_principle),
            "interestOnlyRate" => Some(&mut self.interest_only_rate),
            "otherMonthlyFinancing" => Some(&mut self.other_monthly_financing),
            _ => None,
        }
    }

    pub(super) fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("firstMtgAmortizationPeriod", self.first_mtg_amortization_period),
            ("firstMtgInterestRate", self.first_mtg_interest_rate),
            ("firstMtgCMHCFee", self.first_mtg_cmhc_fee),
            ("secondMtgPrinciple", self.second_mtg_principle),
            ("secondMtgInterestRate", self.second_mtg_interest_rate),
            ("secondMtgAmortization", self.second_mtg_amortization),
            ("interestOnlyPrinciple", self.interest_only_principle),
            ("interestOnlyRate", self.interest_only_rate),
            ("otherMonthlyFinancing", self.other_monthly_financing),
        ]
    }
}
