//! One-off purchase costs and closing-time cash adjustments

/// Costs added on top of the offer price to get the real purchase price
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionCosts {
    pub repairs: f64,
    pub repairs_contingency: f64,
    pub lender_fee: f64,
    pub broker_fee: f64,
    pub environmentals: f64,
    pub inspections: f64,
    pub appraisals: f64,
    pub misc: f64,
    pub legal: f64,
}

impl Default for AcquisitionCosts {
    fn default() -> Self {
        Self {
            repairs: 5_000.0,
            repairs_contingency: 0.0,
            lender_fee: 10_000.0,
            broker_fee: 500.0,
            environmentals: 0.0,
            inspections: 1_300.0,
            appraisals: 1_000.0,
            misc: 500.0,
            legal: 4_000.0,
        }
    }
}

impl AcquisitionCosts {
    /// Sum of every acquisition cost line
    pub fn total(&self) -> f64 {
        self.repairs
            + self.repairs_contingency
            + self.lender_fee
            + self.broker_fee
            + self.environmentals
            + self.inspections
            + self.appraisals
            + self.misc
            + self.legal
    }

    pub(super) fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "repairs" => Some(&mut self.repairs),
            "repairsContingency" => Some(&mut self.repairs_contingency),
            "lenderFee" => Some(&mut self.lender_fee),
            "brokerFee" => Some(&mut self.broker_fee),
            "environmentals" => Some(&mut self.environmentals),
            "inspections" => Some(&mut self.inspections),
            "appraisals" => Some(&mut self.appraisals),
            "misc" => Some(&mut self.misc),
            "legal" => Some(&mut self.legal),
            _ => None,
        }
    }

    pub(super) fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("repairs", self.repairs),
            ("repairsContingency", self.repairs_contingency),
            ("lenderFee", self.lender_fee),
            ("brokerFee", self.broker_fee),
            ("environmentals", self.environmentals),
            ("inspections", self.inspections),
            ("appraisals", self.appraisals),
            ("misc", self.misc),
            ("legal", self.legal),
        ]
    }
}

/// Cash movements between offer and close
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashAdjustments {
    /// Deposit paid with the offer
    pub deposit_with_offer: f64,
    /// Rents pro-rated to the buyer at closing
    pub less_pro_ration_of_rents: f64,
}

impl CashAdjustments {
    pub(super) fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "depositWithOffer" | "deposit" => Some(&mut self.deposit_with_offer),
            "lessProRationOfRents" | "proRationOfRents" => Some(&mut self.less_pro_ration_of_rents),
            _ => None,
        }
    }

    pub(super) fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("depositWithOffer", self.deposit_with_offer),
            ("lessProRationOfRents", self.less_pro_ration_of_rents),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_acquisition_total() {
        // 5000 + 10000 + 500 + 1300 + 1000 + 500 + 4000
        assert_eq!(AcquisitionCosts::default().total(), 22_300.0);
    }

    #[test]
    fn test_cash_adjustment_aliases() {
        let mut cash = CashAdjustments::default();
        *cash.slot_mut("deposit").unwrap() = 10_000.0;
        *cash.slot_mut("proRationOfRents").unwrap() = 1_500.0;
        assert_eq!(cash.deposit_with_offer, 10_000.0);
        assert_eq!(cash.less_pro_ration_of_rents, 1_500.0);
    }
}
