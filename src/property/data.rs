//! Property facts consumed by the cash-flow calculator

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Financial facts for a single listing
///
/// Every field is optional; defaults are applied by [`PropertyFacts::resolve`]
/// so that a sparse upstream record never blocks a calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFacts {
    /// Listings-provider identifier
    #[serde(default)]
    pub property_id: Option<String>,

    /// Display address ("line, city, state postal")
    #[serde(default)]
    pub address: Option<String>,

    /// Purchase price
    #[serde(default)]
    pub offer_price: Option<f64>,

    /// Appraised value (falls back to offer price)
    #[serde(default)]
    pub fair_market_value: Option<f64>,

    /// Number of rentable units
    #[serde(default)]
    pub number_of_units: Option<u32>,

    /// Estimated annual rental income
    #[serde(default)]
    pub gross_rents: Option<f64>,

    /// Annual property taxes
    #[serde(default)]
    pub property_taxes: Option<f64>,

    /// Annual insurance premium
    #[serde(default)]
    pub insurance: Option<f64>,
}

/// Plain-number view of [`PropertyFacts`] with all defaults applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFacts {
    pub offer_price: f64,
    pub fair_market_value: f64,
    /// Always >= 1
    pub number_of_units: u32,
    pub gross_rents: f64,
    pub property_taxes: f64,
    /// Insurance as a fraction of offer price
    pub insurance_rate: f64,
}

impl PropertyFacts {
    /// Create facts from the core purchase figures
    pub fn new(offer_price: f64, number_of_units: u32, gross_rents: f64) -> Self {
        Self {
            offer_price: Some(offer_price),
            number_of_units: Some(number_of_units),
            gross_rents: Some(gross_rents),
            ..Default::default()
        }
    }

    /// Apply the documented defaults
    ///
    /// Zero is treated the same as absent for fair market value and unit count,
    /// so a listing that reports `0` units still divides by one.
    pub fn resolve(&self) -> ResolvedFacts {
        let offer_price = self.offer_price.unwrap_or(0.0);
        let fair_market_value = match self.fair_market_value {
            Some(fmv) if fmv != 0.0 => fmv,
            _ => offer_price,
        };
        let number_of_units = match self.number_of_units {
            Some(units) if units > 0 => units,
            _ => 1,
        };
        let insurance_rate = match self.insurance {
            Some(insurance) if insurance != 0.0 && offer_price != 0.0 => insurance / offer_price,
            _ => 0.0,
        };

        ResolvedFacts {
            offer_price,
            fair_market_value,
            number_of_units,
            gross_rents: self.gross_rents.unwrap_or(0.0),
            property_taxes: self.property_taxes.unwrap_or(0.0),
            insurance_rate,
        }
    }

    /// Extract facts from a listings-provider property detail payload
    ///
    /// Reads `data.home`: `list_price` feeds both offer price and fair market value,
    /// `description.units` the unit count, and the mortgage tax/insurance rates are
    /// scaled by list price. Rental income is not part of the payload and is
    /// supplied by the caller.
    pub fn from_listing_detail(detail: &Value, gross_rents: f64) -> Self {
        let home = &detail["data"]["home"];
        let list_price = home["list_price"].as_f64();
        let mortgage = &home["mortgage"];

        let address = home["location"]["address"]
            .as_object()
            .map(|address| {
                let field = |key: &str| address.get(key).and_then(Value::as_str).unwrap_or("");
                format!(
                    "{}, {}, {} {}",
                    field("line"),
                    field("city"),
                    field("state_code"),
                    field("postal_code")
                )
            });

        let number_of_units = match home["description"]["units"].as_u64() {
            Some(units) => match u32::try_from(units) {
                Ok(units) => Some(units),
                Err(_) => {
                    log::warn!("ignoring out-of-range unit count {}", units);
                    None
                }
            },
            None => Some(1),
        };

        let scaled_by_price = |rate: &Value| {
            list_price
                .filter(|price| *price != 0.0)
                .map(|price| rate.as_f64().unwrap_or(0.0) * price)
        };

        Self {
            property_id: home["property_id"].as_str().map(str::to_string),
            address,
            offer_price: list_price,
            fair_market_value: list_price,
            number_of_units,
            gross_rents: Some(gross_rents),
            property_taxes: scaled_by_price(&mortgage["property_tax_rate"]),
            insurance: scaled_by_price(&mortgage["insurance_rate"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_resolve_defaults() {
        let resolved = PropertyFacts::default().resolve();
        assert_eq!(resolved.offer_price, 0.0);
        assert_eq!(resolved.fair_market_value, 0.0);
        assert_eq!(resolved.number_of_units, 1);
        assert_eq!(resolved.gross_rents, 0.0);
        assert_eq!(resolved.insurance_rate, 0.0);
    }

    #[test]
    fn test_resolve_fmv_and_units_fallbacks() {
        let facts = PropertyFacts {
            offer_price: Some(250_000.0),
            fair_market_value: Some(0.0),
            number_of_units: Some(0),
            insurance: Some(2_500.0),
            ..Default::default()
        };
        let resolved = facts.resolve();
        assert_eq!(resolved.fair_market_value, 250_000.0);
        assert_eq!(resolved.number_of_units, 1);
        assert_relative_eq!(resolved.insurance_rate, 0.01);
    }

    #[test]
    fn test_insurance_ignored_without_offer_price() {
        let facts = PropertyFacts {
            insurance: Some(1_200.0),
            ..Default::default()
        };
        assert_eq!(facts.resolve().insurance_rate, 0.0);
    }

    #[test]
    fn test_from_listing_detail() {
        let detail = json!({
            "data": {
                "home": {
                    "property_id": "M1234567890",
                    "list_price": 500000,
                    "description": { "units": 2, "beds": 3 },
                    "location": {
                        "address": {
                            "line": "12 Elm St",
                            "city": "Austin",
                            "state_code": "TX",
                            "postal_code": "78701"
                        }
                    },
                    "mortgage": { "property_tax_rate": 0.012, "insurance_rate": 0.004 }
                }
            }
        });

        let facts = PropertyFacts::from_listing_detail(&detail, 48_000.0);
        assert_eq!(facts.property_id.as_deref(), Some("M1234567890"));
        assert_eq!(facts.address.as_deref(), Some("12 Elm St, Austin, TX 78701"));
        assert_eq!(facts.offer_price, Some(500_000.0));
        assert_eq!(facts.fair_market_value, Some(500_000.0));
        assert_eq!(facts.number_of_units, Some(2));
        assert_relative_eq!(facts.property_taxes.unwrap(), 6_000.0);
        assert_relative_eq!(facts.insurance.unwrap(), 2_000.0);
    }

    #[test]
    fn test_out_of_range_unit_count_is_absent() {
        let detail = json!({
            "data": { "home": { "list_price": 250000, "description": { "units": 4_294_967_296u64 } } }
        });
        let facts = PropertyFacts::from_listing_detail(&detail, 20_000.0);
        assert_eq!(facts.number_of_units, None);
        assert_eq!(facts.resolve().number_of_units, 1);

        let detail = json!({ "data": { "home": { "description": { "units": 4_294_967_295u64 } } } });
        let facts = PropertyFacts::from_listing_detail(&detail, 0.0);
        assert_eq!(facts.number_of_units, Some(u32::MAX));
    }

    #[test]
    fn test_from_empty_listing_detail() {
        let facts = PropertyFacts::from_listing_detail(&json!({}), 30_000.0);
        assert_eq!(facts.offer_price, None);
        assert_eq!(facts.number_of_units, Some(1));
        assert_eq!(facts.property_taxes, None);
        assert_eq!(facts.gross_rents, Some(30_000.0));
    }
}
