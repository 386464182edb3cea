//! Investor assumptions: acquisition costs, financing, income and expense lines

mod acquisition;
mod financing;
mod operating;
pub mod loader;
mod store;

pub use acquisition::{AcquisitionCosts, CashAdjustments};
pub use financing::FinancingTerms;
pub use operating::{MarketRates, OperatingExpenses, OtherIncome};
pub use store::{AssumptionStore, InMemoryAssumptionStore, UserId};

use crate::error::AssumptionError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

/// Calculator-side key names and the profile key each one sets
const KEY_ALIASES: [(&str, &str); 6] = [
    ("parkingIncome", "parking"),
    ("storageIncome", "storage"),
    ("laundryVendingIncome", "laundryVending"),
    ("miscExpenses", "miscellaneous"),
    ("deposit", "depositWithOffer"),
    ("proRationOfRents", "lessProRationOfRents"),
];

/// Container for all calculation assumptions
///
/// Keys in external mappings are camelCase (`vacancyRate`, `firstMtgInterestRate`).
/// Percentages are whole numbers: `6.5` means 6.5%.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assumptions {
    pub market: MarketRates,
    pub acquisition: AcquisitionCosts,
    pub financing: FinancingTerms,
    pub income: OtherIncome,
    pub expenses: OperatingExpenses,
    pub cash: CashAdjustments,
}

impl Assumptions {
    /// Resolve a flat user-input mapping on top of the defaults
    ///
    /// Missing keys keep their default and unknown keys are ignored. A key the
    /// calculation reads must hold a JSON number; a non-numeric profile-only
    /// line keeps its default.
    ///
    /// Alias keys are applied after canonical ones, so `deposit` wins over
    /// `depositWithOffer` when both are sent.
    pub fn from_mapping(mapping: &Map<String, Value>) -> Result<Self, AssumptionError> {
        let mut assumptions = Self::default();

        for (alias, canonical) in KEY_ALIASES {
            if mapping.contains_key(alias) && mapping.contains_key(canonical) {
                log::warn!("both '{}' and '{}' given; using '{}'", alias, canonical, alias);
            }
        }

        let is_alias = |key: &str| KEY_ALIASES.iter().any(|(alias, _)| *alias == key);
        let canonical_first = mapping
            .iter()
            .filter(|(key, _)| !is_alias(key.as_str()))
            .chain(mapping.iter().filter(|(key, _)| is_alias(key.as_str())));

        for (key, value) in canonical_first {
            let Some(slot) = assumptions.slot_mut(key) else {
                log::debug!("ignoring unknown assumption key '{}'", key);
                continue;
            };
            match value.as_f64() {
                Some(number) => *slot = number,
                None if operating::PROFILE_ONLY_KEYS.contains(&key.as_str()) => {
                    log::warn!("ignoring non-numeric value {} for '{}'", value, key);
                }
                None => {
                    return Err(AssumptionError::NotNumeric {
                        key: key.clone(),
                        value: value.to_string(),
                    })
                }
            }
        }
        Ok(assumptions)
    }

    /// Set a single assumption by its camelCase key
    pub fn set(&mut self, key: &str, value: f64) -> Result<(), AssumptionError> {
        let slot = self
            .slot_mut(key)
            .ok_or_else(|| AssumptionError::UnknownKey(key.to_string()))?;
        *slot = value;
        Ok(())
    }

    /// All assumptions as (camelCase key, value) pairs, grouped by category
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let mut entries = self.market.entries();
        entries.extend(self.acquisition.entries());
        entries.extend(self.financing.entries());
        entries.extend(self.income.entries());
        entries.extend(self.expenses.entries());
        entries.extend(self.cash.entries());
        entries
    }

    /// Flat camelCase mapping, as echoed back to API callers
    pub fn to_mapping(&self) -> Map<String, Value> {
        self.entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::from(value)))
            .collect()
    }

    /// Load assumptions from a `.json` mapping or a `Key,Value` CSV file
    pub fn from_path(path: &Path) -> Result<Self, AssumptionError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => loader::load_assumptions_json(path),
            _ => loader::load_assumptions_csv(path),
        }
    }

    /// Load the default assumptions file (data/assumptions/default.csv)
    pub fn from_csv() -> Result<Self, AssumptionError> {
        Self::from_path(&Path::new(loader::DEFAULT_ASSUMPTIONS_PATH).join(loader::DEFAULT_ASSUMPTIONS_FILE))
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut f64> {
        if let Some(slot) = self.market.slot_mut(key) {
            return Some(slot);
        }
        if let Some(slot) = self.acquisition.slot_mut(key) {
            return Some(slot);
        }
        if let Some(slot) = self.financing.slot_mut(key) {
            return Some(slot);
        }
        if let Some(slot) = self.income.slot_mut(key) {
            return Some(slot);
        }
        if let Some(slot) = self.expenses.slot_mut(key) {
            return Some(slot);
        }
        self.cash.slot_mut(key)
    }
}

impl Serialize for Assumptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn test_defaults() {
        let a = Assumptions::default();
        assert_eq!(a.market.vacancy_rate, 5.0);
        assert_eq!(a.market.management_rate, 10.0);
        assert_eq!(a.expenses.repairs_rate, 5.0);
        assert_eq!(a.financing.first_mtg_interest_rate, 6.5);
        assert_eq!(a.financing.first_mtg_amortization_period, 30.0);
        assert_eq!(a.financing.second_mtg_principle, 0.0);
        assert_eq!(a.expenses.water_sewer, 100.0);
    }

    #[test]
    fn test_entry_count_and_uniqueness() {
        let entries = Assumptions::default().entries();
        assert_eq!(entries.len(), 44);

        let mut keys: Vec<_> = entries.iter().map(|(k, _)| *k).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 44);
    }

    #[test]
    fn test_from_mapping_overrides_and_aliases() {
        let a = Assumptions::from_mapping(&mapping(json!({
            "vacancyRate": 8,
            "firstMtgInterestRate": 5.25,
            "deposit": 20000,
            "miscExpenses": 350.5,
            "notAKey": "ignored"
        })))
        .expect("valid mapping");

        assert_eq!(a.market.vacancy_rate, 8.0);
        assert_eq!(a.financing.first_mtg_interest_rate, 5.25);
        assert_eq!(a.cash.deposit_with_offer, 20_000.0);
        assert_eq!(a.expenses.miscellaneous, 350.5);
        // untouched keys keep defaults
        assert_eq!(a.market.management_rate, 10.0);
    }

    #[test]
    fn test_from_mapping_rejects_non_numeric() {
        let err = Assumptions::from_mapping(&mapping(json!({ "vacancyRate": "five" })))
            .expect_err("string is not numeric");
        match err {
            AssumptionError::NotNumeric { key, .. } => assert_eq!(key, "vacancyRate"),
            other => panic!("unexpected error: {other}"),
        }

        assert!(Assumptions::from_mapping(&mapping(json!({ "legal": null }))).is_err());
    }

    #[test]
    fn test_alias_takes_precedence_over_profile_key() {
        let a = Assumptions::from_mapping(&mapping(json!({
            "deposit": 5000,
            "depositWithOffer": 9000,
            "miscExpenses": 120,
            "miscellaneous": 480
        })))
        .unwrap();

        assert_eq!(a.cash.deposit_with_offer, 5_000.0);
        assert_eq!(a.expenses.miscellaneous, 120.0);
    }

    #[test]
    fn test_aliases_all_resolve() {
        for (alias, canonical) in KEY_ALIASES {
            let mut from_alias = Assumptions::default();
            from_alias.set(alias, 42.0).unwrap();
            let mut from_canonical = Assumptions::default();
            from_canonical.set(canonical, 42.0).unwrap();
            assert_eq!(from_alias, from_canonical, "{alias} -> {canonical}");
        }
    }

    #[test]
    fn test_non_numeric_profile_only_line_keeps_default() {
        let a = Assumptions::from_mapping(&mapping(json!({
            "accounting": "n/a",
            "badDebts": null,
            "vacancyRate": 6
        })))
        .expect("profile-only lines do not block resolution");

        assert_eq!(a.expenses.accounting, 0.0);
        assert_eq!(a.expenses.bad_debts, 0.0);
        assert_eq!(a.market.vacancy_rate, 6.0);
    }

    #[test]
    fn test_mapping_round_trip() {
        let mut a = Assumptions::default();
        a.set("secondMtgPrinciple", 50_000.0).unwrap();
        a.set("hoaFees", 1_200.0).unwrap();

        let back = Assumptions::from_mapping(&a.to_mapping()).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn test_set_unknown_key() {
        let mut a = Assumptions::default();
        assert!(matches!(a.set("grossRents", 1.0), Err(AssumptionError::UnknownKey(_))));
    }

    #[test]
    fn test_serialize_is_flat_camel_case() {
        let value = serde_json::to_value(Assumptions::default()).unwrap();
        assert_eq!(value["vacancyRate"], json!(5.0));
        assert_eq!(value["firstMtgCMHCFee"], json!(0.0));
        assert!(value.get("market").is_none());
    }
}
