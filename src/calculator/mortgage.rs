//! Loan arithmetic: level-payment amortization and interest-only tranches

/// Convert an annual whole-number percentage into a monthly decimal rate
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 100.0 / 12.0
}

/// Monthly payment on an interest-only balance
pub fn interest_only_payment(principal: f64, annual_rate_pct: f64) -> f64 {
    principal * monthly_rate(annual_rate_pct)
}

/// A fixed-payment amortizing loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmortizingLoan {
    pub principal: f64,
    /// Monthly rate as a decimal
    pub monthly_rate: f64,
    /// Amortization period in months
    pub months: f64,
}

impl AmortizingLoan {
    /// Build a loan from an annual percentage rate and a term in years
    pub fn from_annual(principal: f64, annual_rate_pct: f64, years: f64) -> Self {
        Self {
            principal,
            monthly_rate: monthly_rate(annual_rate_pct),
            months: years * 12.0,
        }
    }

    /// Cap the amortization period at `max_months`
    pub fn with_max_months(mut self, max_months: f64) -> Self {
        self.months = self.months.min(max_months);
        self
    }

    /// Level monthly payment: P·r(1+r)^n / ((1+r)^n − 1)
    ///
    /// A zero rate repays principal evenly; a non-positive term has no payment.
    pub fn monthly_payment(&self) -> f64 {
        if self.months <= 0.0 {
            return 0.0;
        }
        if self.monthly_rate == 0.0 {
            return self.principal / self.months;
        }
        let growth = (1.0 + self.monthly_rate).powf(self.months);
        self.principal * self.monthly_rate * growth / (growth - 1.0)
    }

    /// Outstanding balance after `payments` level payments
    ///
    /// Uses P·((1+r)^n − (1+r)^k) / ((1+r)^n − 1); with a zero rate the balance
    /// falls linearly. Paying past the end of the term leaves nothing owing.
    pub fn balance_after(&self, payments: f64) -> f64 {
        if self.months <= 0.0 {
            return 0.0;
        }
        let paid = payments.clamp(0.0, self.months);
        if self.monthly_rate == 0.0 {
            return self.principal * (self.months - paid) / self.months;
        }
        let growth = (1.0 + self.monthly_rate).powf(self.months);
        let elapsed = (1.0 + self.monthly_rate).powf(paid);
        self.principal * (growth - elapsed) / (growth - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_30_year_payment() {
        let loan = AmortizingLoan::from_annual(400_000.0, 6.5, 30.0);
        assert_relative_eq!(loan.monthly_payment(), 2528.27, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let loan = AmortizingLoan::from_annual(360_000.0, 0.0, 30.0);
        assert_eq!(loan.monthly_payment(), 1_000.0);
        assert_eq!(loan.balance_after(12.0), 348_000.0);
    }

    #[test]
    fn test_zero_term_has_no_payment() {
        let loan = AmortizingLoan::from_annual(100_000.0, 5.0, 0.0);
        assert_eq!(loan.monthly_payment(), 0.0);
        assert_eq!(loan.balance_after(12.0), 0.0);

        let negative = AmortizingLoan::from_annual(100_000.0, 0.0, -5.0);
        assert_eq!(negative.monthly_payment(), 0.0);
    }

    #[test]
    fn test_balance_after_first_year() {
        let loan = AmortizingLoan::from_annual(400_000.0, 6.5, 30.0);
        assert_relative_eq!(loan.balance_after(0.0), 400_000.0, epsilon = 1e-6);
        assert_relative_eq!(loan.balance_after(12.0), 395_529.10, epsilon = 0.01);
        assert_relative_eq!(loan.balance_after(360.0), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_term_cap() {
        let loan = AmortizingLoan::from_annual(50_000.0, 12.0, 9999.0).with_max_months(360.0);
        assert_eq!(loan.months, 360.0);
        // 12% over 30 years on 50k
        assert_relative_eq!(loan.monthly_payment(), 514.31, epsilon = 0.01);
    }

    #[test]
    fn test_interest_only() {
        assert_relative_eq!(interest_only_payment(120_000.0, 6.0), 600.0);
        assert_eq!(interest_only_payment(0.0, 9.0), 0.0);
    }
}
