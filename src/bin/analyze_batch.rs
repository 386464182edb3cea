//! Analyse every property in a listings CSV
//!
//! Writes one row of headline metrics per property

use anyhow::{Context, Result};
use clap::Parser;
use rental_cashflow::property::{load_properties, loader::DEFAULT_PROPERTIES_PATH};
use rental_cashflow::{Assumptions, CashflowReport, Metric, PropertyFacts, ScenarioRunner};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "analyze_batch")]
#[command(about = "Parallel cash-flow analysis for a listings CSV")]
struct Args {
    /// Listings CSV
    #[arg(short, long, default_value = DEFAULT_PROPERTIES_PATH)]
    input: PathBuf,

    /// Assumptions file (.csv or .json); defaults to data/assumptions/default.csv
    #[arg(short, long)]
    assumptions: Option<PathBuf>,

    /// Output CSV
    #[arg(short, long, default_value = "batch_analysis_output.csv")]
    output: PathBuf,
}

/// Headline metrics written per property
#[derive(Debug, serde::Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "PropertyID")]
    property_id: &'a str,
    #[serde(rename = "Address")]
    address: &'a str,
    #[serde(rename = "Status")]
    status: &'static str,
    #[serde(rename = "NOI")]
    net_operating_income: Option<f64>,
    #[serde(rename = "TotalCashRequired")]
    total_cash_required: Option<f64>,
    #[serde(rename = "AnnualProfit")]
    annual_profit: Option<f64>,
    #[serde(rename = "CashflowPerUnit")]
    cashflow_per_unit: f64,
    #[serde(rename = "CapRate")]
    cap_rate: Option<f64>,
    #[serde(rename = "CashOnCashROI")]
    cash_on_cash_roi: String,
    #[serde(rename = "TotalROI")]
    total_roi: String,
}

impl<'a> SummaryRow<'a> {
    fn new(facts: &'a PropertyFacts, report: &CashflowReport) -> Self {
        let result = report.result();
        let metric = |pick: fn(&rental_cashflow::CalculationResult) -> Metric| {
            result.map(|r| format!("{:.6}", pick(r))).unwrap_or_default()
        };

        Self {
            property_id: facts.property_id.as_deref().unwrap_or(""),
            address: facts.address.as_deref().unwrap_or(""),
            status: if report.is_fallback() { "fallback" } else { "ok" },
            net_operating_income: result.map(|r| r.net_operating_income),
            total_cash_required: result.map(|r| r.total_cash_required),
            annual_profit: result.map(|r| r.annual_profit_or_loss),
            cashflow_per_unit: report.cashflow_per_unit(),
            cap_rate: result.map(|r| r.cap_rate_on_pp),
            cash_on_cash_roi: metric(|r| r.cash_on_cash_roi),
            total_roi: metric(|r| r.total_roi),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading properties from {}...", args.input.display());
    let properties = load_properties(&args.input)
        .with_context(|| format!("Failed to load properties from {}", args.input.display()))?;
    println!("Loaded {} properties in {:?}", properties.len(), start.elapsed());

    let assumptions = match &args.assumptions {
        Some(path) => Assumptions::from_path(path),
        None => Assumptions::from_csv(),
    }
    .context("Failed to load assumptions")?;
    let runner = ScenarioRunner::with_assumptions(assumptions);

    println!("Running calculations...");
    let calc_start = Instant::now();
    let reports = runner.run_batch(&properties);
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let fallbacks = reports.iter().filter(|r| r.is_fallback()).count();
    if fallbacks > 0 {
        log::warn!("{} of {} properties fell back", fallbacks, reports.len());
    }

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for (facts, report) in properties.iter().zip(&reports) {
        writer.serialize(SummaryRow::new(facts, report))?;
    }
    writer.flush()?;

    let total_cashflow: f64 = properties
        .iter()
        .zip(&reports)
        .map(|(facts, report)| report.cashflow_per_unit() * f64::from(facts.resolve().number_of_units))
        .sum();

    println!("Output written to {}", args.output.display());
    println!("Combined monthly cashflow: ${:.2}", total_cashflow);
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
