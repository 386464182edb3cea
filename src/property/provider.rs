//! Property fact lookup by listing identifier

use super::PropertyFacts;
use crate::error::PropertyError;
use std::collections::HashMap;

/// Source of property facts for a listing identifier
pub trait PropertyFactProvider {
    /// Look up the facts for a single listing
    fn facts_for(&self, property_id: &str) -> Result<PropertyFacts, PropertyError>;
}

/// HashMap-backed provider, typically filled from a CSV export
#[derive(Debug, Clone, Default)]
pub struct InMemoryFactProvider {
    properties: HashMap<String, PropertyFacts>,
}

impl InMemoryFactProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index properties by their identifier; rows without one are skipped
    pub fn from_properties(properties: impl IntoIterator<Item = PropertyFacts>) -> Self {
        let mut provider = Self::new();
        for facts in properties {
            provider.insert(facts);
        }
        provider
    }

    /// Insert or replace a property. Returns false when it has no identifier.
    pub fn insert(&mut self, facts: PropertyFacts) -> bool {
        match facts.property_id.clone() {
            Some(id) => {
                self.properties.insert(id, facts);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl PropertyFactProvider for InMemoryFactProvider {
    fn facts_for(&self, property_id: &str) -> Result<PropertyFacts, PropertyError> {
        self.properties
            .get(property_id)
            .cloned()
            .ok_or_else(|| PropertyError::NotFound(property_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_id(id: &str) -> PropertyFacts {
        PropertyFacts {
            property_id: Some(id.to_string()),
            ..PropertyFacts::new(400_000.0, 1, 30_000.0)
        }
    }

    #[test]
    fn test_lookup() {
        let provider = InMemoryFactProvider::from_properties(vec![with_id("A"), with_id("B")]);
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.facts_for("B").unwrap().offer_price, Some(400_000.0));
    }

    #[test]
    fn test_missing_property() {
        let provider = InMemoryFactProvider::new();
        assert!(matches!(provider.facts_for("nope"), Err(PropertyError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_rows_without_id_skipped() {
        let mut provider = InMemoryFactProvider::new();
        assert!(!provider.insert(PropertyFacts::new(1.0, 1, 1.0)));
        assert!(provider.is_empty());
    }
}
