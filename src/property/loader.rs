//! Load property facts from a listings export CSV

use super::PropertyFacts;
use crate::error::PropertyError;
use csv::Reader;
use std::path::Path;

/// Default location of the sample listings export
pub const DEFAULT_PROPERTIES_PATH: &str = "data/properties.csv";

/// Raw CSV row; empty cells deserialize to `None`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "PropertyID")]
    property_id: Option<String>,
    #[serde(rename = "Address")]
    address: Option<String>,
    #[serde(rename = "OfferPrice")]
    offer_price: Option<f64>,
    #[serde(rename = "FairMarketValue")]
    fair_market_value: Option<f64>,
    #[serde(rename = "Units")]
    units: Option<u32>,
    #[serde(rename = "GrossRents")]
    gross_rents: Option<f64>,
    #[serde(rename = "PropertyTaxes")]
    property_taxes: Option<f64>,
    #[serde(rename = "Insurance")]
    insurance: Option<f64>,
}

impl From<CsvRow> for PropertyFacts {
    fn from(row: CsvRow) -> Self {
        Self {
            property_id: row.property_id.filter(|id| !id.is_empty()),
            address: row.address.filter(|address| !address.is_empty()),
            offer_price: row.offer_price,
            fair_market_value: row.fair_market_value,
            number_of_units: row.units,
            gross_rents: row.gross_rents,
            property_taxes: row.property_taxes,
            insurance: row.insurance,
        }
    }
}

/// Load all properties from a CSV file
pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyFacts>, PropertyError> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load properties from any reader (e.g., string buffer, request body)
pub fn load_properties_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<PropertyFacts>, PropertyError> {
    collect_rows(Reader::from_reader(reader))
}

/// Load properties from the default sample export
pub fn load_default_properties() -> Result<Vec<PropertyFacts>, PropertyError> {
    load_properties(DEFAULT_PROPERTIES_PATH)
}

fn collect_rows<R: std::io::Read>(
    mut reader: Reader<R>,
) -> Result<Vec<PropertyFacts>, PropertyError> {
    let mut properties = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        properties.push(PropertyFacts::from(row));
    }
    log::debug!("loaded {} properties", properties.len());
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
PropertyID,Address,OfferPrice,FairMarketValue,Units,GrossRents,PropertyTaxes,Insurance
P1,\"12 Elm St, Austin, TX 78701\",500000,500000,2,48000,6000,2000
P2,,320000,,,21600,,
";

    #[test]
    fn test_load_properties_from_reader() {
        let properties = load_properties_from_reader(SAMPLE.as_bytes()).expect("sample parses");
        assert_eq!(properties.len(), 2);

        let first = &properties[0];
        assert_eq!(first.property_id.as_deref(), Some("P1"));
        assert_eq!(first.address.as_deref(), Some("12 Elm St, Austin, TX 78701"));
        assert_eq!(first.number_of_units, Some(2));
        assert_eq!(first.insurance, Some(2000.0));

        let second = &properties[1];
        assert_eq!(second.address, None);
        assert_eq!(second.fair_market_value, None);
        assert_eq!(second.number_of_units, None);
        assert_eq!(second.resolve().fair_market_value, 320_000.0);
    }

    #[test]
    fn test_malformed_row_is_error() {
        let bad = "\
PropertyID,Address,OfferPrice,FairMarketValue,Units,GrossRents,PropertyTaxes,Insurance
P1,,not-a-number,,,,,
";
        assert!(matches!(
            load_properties_from_reader(bad.as_bytes()),
            Err(PropertyError::Csv(_))
        ));
    }

    #[test]
    fn test_load_default_properties() {
        let properties = load_default_properties().expect("sample export present");
        assert!(!properties.is_empty());
        assert!(properties.iter().all(|p| p.property_id.is_some()));
    }
}
