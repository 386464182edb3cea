//! Property facts, listing extraction and loading

mod data;
pub mod loader;
mod provider;

pub use data::{PropertyFacts, ResolvedFacts};
pub use loader::{load_properties, load_properties_from_reader, load_default_properties};
pub use provider::{PropertyFactProvider, InMemoryFactProvider};
