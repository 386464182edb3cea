//! Market rates, ancillary income and operating expense lines

/// Rate-style assumptions about the local market (whole-number percentages)
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRates {
    pub vacancy_rate: f64,
    pub management_rate: f64,
    /// Flat advertising spend per turnover
    pub advertising_cost_per_vacancy: f64,
    pub annual_appreciation_rate: f64,
}

impl Default for MarketRates {
    fn default() -> Self {
        Self {
            vacancy_rate: 5.0,
            management_rate: 10.0,
            advertising_cost_per_vacancy: 100.0,
            annual_appreciation_rate: 3.0,
        }
    }
}

impl MarketRates {
    pub(super) fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "vacancyRate" => Some(&mut self.vacancy_rate),
            "managementRate" => Some(&mut self.management_rate),
            "advertisingCostPerVacancy" => Some(&mut self.advertising_cost_per_vacancy),
            "annualAppreciationRate" => Some(&mut self.annual_appreciation_rate),
            _ => None,
        }
    }

    pub(super) fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("vacancyRate", self.vacancy_rate),
            ("managementRate", self.management_rate),
            ("advertisingCostPerVacancy", self.advertising_cost_per_vacancy),
            ("annualAppreciationRate", self.annual_appreciation_rate),
        ]
    }
}

/// Annual income on top of gross rents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OtherIncome {
    pub parking: f64,
    pub storage: f64,
    pub laundry_vending: f64,
    pub other_income: f64,
}

impl OtherIncome {
    pub fn total(&self) -> f64 {
        self.parking + self.storage + self.laundry_vending + self.other_income
    }

    pub(super) fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "parking" | "parkingIncome" => Some(&mut self.parking),
            "storage" | "storageIncome" => Some(&mut self.storage),
            "laundryVending" | "laundryVendingIncome" => Some(&mut self.laundry_vending),
            "otherIncome" => Some(&mut self.other_income),
            _ => None,
        }
    }

    pub(super) fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("parking", self.parking),
            ("storage", self.storage),
            ("laundryVending", self.laundry_vending),
            ("otherIncome", self.other_income),
        ]
    }
}

/// Profile keys that no calculation reads
pub(super) const PROFILE_ONLY_KEYS: [&str; 6] = [
    "commonAreaMaintenance",
    "capitalImprovements",
    "accounting",
    "legalExpenses",
    "badDebts",
    "otherExpenses",
];

/// Annual operating expense lines
///
/// The last six fields are kept with a user's profile but are not part of the
/// expense roll-up.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingExpenses {
    /// Repairs as a percentage of gross rents
    pub repairs_rate: f64,
    pub electricity: f64,
    pub gas: f64,
    pub lawn_maintenance: f64,
    pub water_sewer: f64,
    pub cable: f64,
    pub caretaking: f64,
    pub hoa_fees: f64,
    pub trash_removal: f64,
    pub miscellaneous: f64,
    pub common_area_maintenance: f64,
    pub capital_improvements: f64,
    pub accounting: f64,
    pub legal_expenses: f64,
    pub bad_debts: f64,
    pub other_expenses: f64,
}

impl Default for OperatingExpenses {
    fn default() -> Self {
        Self {
            repairs_rate: 5.0,
            electricity: 0.0,
            gas: 0.0,
            lawn_maintenance: 0.0,
            water_sewer: 100.0,
            cable: 0.0,
            caretaking: 0.0,
            hoa_fees: 0.0,
            trash_removal: 0.0,
            miscellaneous: 0.0,
            common_area_maintenance: 0.0,
            capital_improvements: 0.0,
            accounting: 0.0,
            legal_expenses: 0.0,
            bad_debts: 0.0,
            other_expenses: 0.0,
        }
    }
}

impl OperatingExpenses {
    /// Fixed annual lines that flow straight into total expenses
    pub fn pass_through_total(&self) -> f64 {
        self.electricity
            + self.gas
            + self.lawn_maintenance
            + self.water_sewer
            + self.cable
            + self.caretaking
            + self.hoa_fees
            + self.trash_removal
            + self.miscellaneous
    }

    pub(super) fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "repairsRate" => Some(&mut self.repairs_rate),
            "electricity" => Some(&mut self.electricity),
            "gas" => Some(&mut self.gas),
            "lawnMaintenance" => Some(&mut self.lawn_maintenance),
            "waterSewer" => Some(&mut self.water_sewer),
            "cable" => Some(&mut self.cable),
            "caretaking" => Some(&mut self.caretaking),
            "hoaFees" => Some(&mut self.hoa_fees),
            "trashRemoval" => Some(&mut self.trash_removal),
            "miscellaneous" | "miscExpenses" => Some(&mut self.miscellaneous),
            "commonAreaMaintenance" => Some(&mut self.common_area_maintenance),
            "capitalImprovements" => Some(&mut self.capital_improvements),
            "accounting" => Some(&mut self.accounting),
            "legalExpenses" => Some(&mut self.legal_expenses),
            "badDebts" => Some(&mut self.bad_debts),
            "otherExpenses" => Some(&mut self.other_expenses),
            _ => None,
        }
    }

    pub(super) fn entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("repairsRate", self.repairs_rate),
            ("electricity", self.electricity),
            ("gas", self.gas),
            ("lawnMaintenance", self.lawn_maintenance),
            ("waterSewer", self.water_sewer),
            ("cable", self.cable),
            ("caretaking", self.caretaking),
            ("hoaFees", self.hoa_fees),
            ("trashRemoval", self.trash_removal),
            ("miscellaneous", self.miscellaneous),
            ("commonAreaMaintenance", self.common_area_maintenance),
            ("capitalImprovements", self.capital_improvements),
            ("accounting", self.accounting),
            ("legalExpenses", self.legal_expenses),
            ("badDebts", self.bad_debts),
            ("otherExpenses", self.other_expenses),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through_excludes_profile_only_lines() {
        let expenses = OperatingExpenses {
            electricity: 1_000.0,
            hoa_fees: 2_400.0,
            accounting: 5_000.0,
            bad_debts: 700.0,
            ..Default::default()
        };
        // water/sewer default 100 is included, accounting and bad debts are not
        assert_eq!(expenses.pass_through_total(), 3_500.0);
    }

    #[test]
    fn test_other_income_aliases() {
        let mut income = OtherIncome::default();
        *income.slot_mut("parkingIncome").unwrap() = 600.0;
        *income.slot_mut("laundryVending").unwrap() = 240.0;
        assert_eq!(income.total(), 840.0);
        assert!(income.slot_mut("grossRents").is_none());
    }
}
