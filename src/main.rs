//! Rental Cashflow CLI
//!
//! Analyse one property given inline, or every property in a listings CSV

use anyhow::{bail, Context, Result};
use clap::Parser;
use rental_cashflow::property::load_properties;
use rental_cashflow::{Assumptions, CashflowReport, PropertyFacts, ScenarioRunner};
use std::path::PathBuf;

/// Cash-flow and ROI analysis for rental properties
#[derive(Parser)]
#[command(name = "rental_cashflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Listings CSV to analyse (PropertyID, Address, OfferPrice, ...)
    #[arg(short, long, conflicts_with = "offer_price")]
    property: Option<PathBuf>,

    /// Only analyse this listing from the CSV
    #[arg(long, requires = "property")]
    id: Option<String>,

    /// Purchase price
    #[arg(long)]
    offer_price: Option<f64>,

    /// Appraised value (defaults to the offer price)
    #[arg(long)]
    fair_market_value: Option<f64>,

    /// Number of rentable units
    #[arg(long, default_value_t = 1)]
    units: u32,

    /// Annual gross rents
    #[arg(long, default_value_t = 0.0)]
    gross_rents: f64,

    /// Annual property taxes
    #[arg(long)]
    property_taxes: Option<f64>,

    /// Annual insurance premium
    #[arg(long)]
    insurance: Option<f64>,

    /// Assumptions file (.csv Key,Value or .json mapping)
    #[arg(short, long)]
    assumptions: Option<PathBuf>,

    /// Override a single assumption, e.g. --set vacancyRate=8
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = load_assumptions(&cli)?;
    let properties = load_targets(&cli)?;

    let runner = ScenarioRunner::with_assumptions(assumptions);
    let reports = runner.run_batch(&properties);

    if cli.json {
        let payload: Vec<_> = properties
            .iter()
            .zip(&reports)
            .map(|(facts, report)| serde_json::json!({ "property": facts, "calculation": report }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for (facts, report) in properties.iter().zip(&reports) {
        print_report(facts, report);
    }
    Ok(())
}

fn load_assumptions(cli: &Cli) -> Result<Assumptions> {
    let mut assumptions = match &cli.assumptions {
        Some(path) => Assumptions::from_path(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => Assumptions::default(),
    };

    for entry in &cli.overrides {
        let (key, value) = entry
            .split_once('=')
            .with_context(|| format!("Expected KEY=VALUE, got '{}'", entry))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("Assumption '{}' must be numeric", key))?;
        assumptions.set(key.trim(), value)?;
    }

    Ok(assumptions)
}

fn load_targets(cli: &Cli) -> Result<Vec<PropertyFacts>> {
    let Some(path) = &cli.property else {
        let Some(offer_price) = cli.offer_price else {
            bail!("Provide --property <csv> or --offer-price");
        };
        return Ok(vec![PropertyFacts {
            fair_market_value: cli.fair_market_value,
            property_taxes: cli.property_taxes,
            insurance: cli.insurance,
            ..PropertyFacts::new(offer_price, cli.units, cli.gross_rents)
        }]);
    };

    let mut properties = load_properties(path)
        .with_context(|| format!("Failed to load properties from {}", path.display()))?;
    log::info!("Loaded {} properties from {}", properties.len(), path.display());

    if let Some(id) = &cli.id {
        properties.retain(|facts| facts.property_id.as_deref() == Some(id.as_str()));
        if properties.is_empty() {
            bail!("Property {} not found in {}", id, path.display());
        }
    }
    Ok(properties)
}

fn print_report(facts: &PropertyFacts, report: &CashflowReport) {
    let title = facts
        .address
        .as_deref()
        .or(facts.property_id.as_deref())
        .unwrap_or("Property");
    println!("{}", title);
    println!("{}", "=".repeat(title.len().max(20)));

    if report.is_fallback() {
        println!("  (calculation failed; showing fallback)");
    }
    for (key, metric) in report.entries() {
        println!("  {:<40} {:>16}", key, format!("{:.4}", metric));
    }
    println!();
}
