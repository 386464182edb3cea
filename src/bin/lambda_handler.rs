//! AWS Lambda handler for single-property cash-flow analysis
//!
//! Accepts property facts (or a raw listing detail payload plus estimated rents)
//! and an optional user-input mapping, and returns the calculation alongside the
//! resolved assumptions.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::{DateTime, Utc};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use rental_cashflow::{Assumptions, CashflowCalculator, CashflowReport, PropertyFacts};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Input for one analysis
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    /// Property facts; takes precedence over `listing_detail`
    #[serde(default)]
    pub property: Option<PropertyFacts>,

    /// Raw listings-provider property detail payload
    #[serde(default)]
    pub listing_detail: Option<Value>,

    /// Estimated annual rents for a listing detail payload
    #[serde(default)]
    pub gross_rents: f64,

    /// Flat camelCase user inputs; missing keys use the defaults
    #[serde(default)]
    pub assumptions: Map<String, Value>,
}

/// Output of one analysis
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub property: PropertyFacts,
    pub assumptions: Map<String, Value>,
    pub calculation: CashflowReport,
    pub calculated_at: DateTime<Utc>,
    pub execution_time_ms: u64,
}

/// Run the analysis for a parsed request
fn analyze(request: AnalysisRequest) -> Result<AnalysisResponse, String> {
    let start = std::time::Instant::now();

    let property = match (request.property, request.listing_detail) {
        (Some(property), _) => property,
        (None, Some(detail)) => PropertyFacts::from_listing_detail(&detail, request.gross_rents),
        (None, None) => return Err("Request must include 'property' or 'listing_detail'".to_string()),
    };

    // Resolve once so the echoed profile is the one the calculation used
    let (assumptions, calculation) = match Assumptions::from_mapping(&request.assumptions) {
        Ok(resolved) => {
            let calculator = CashflowCalculator::new(resolved);
            let calculation = calculator.calculate_or_fallback(&property);
            (calculator.assumptions().to_mapping(), calculation)
        }
        Err(e) => {
            log::error!("Unusable assumptions, returning fallback: {}", e);
            (request.assumptions, CashflowReport::Fallback)
        }
    };

    Ok(AnalysisResponse {
        property,
        assumptions,
        calculation,
        calculated_at: Utc::now(),
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

fn cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &AnalysisResponse) -> Result<Response<Body>, Error> {
    Ok(cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: AnalysisRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    match analyze(request) {
        Ok(response) => {
            log::info!(
                "Analysed property {:?} in {}ms",
                response.property.property_id,
                response.execution_time_ms
            );
            json_response(&response)
        }
        Err(message) => error_response(400, &message),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> AnalysisRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_analyze_property() {
        let response = analyze(request(json!({
            "property": { "offer_price": 500000, "number_of_units": 2, "gross_rents": 48000 },
            "assumptions": { "vacancyRate": 5 }
        })))
        .unwrap();

        assert!(!response.calculation.is_fallback());
        assert_eq!(response.assumptions["vacancyRate"], json!(5.0));
        assert_eq!(response.assumptions["managementRate"], json!(10.0));
    }

    #[test]
    fn test_analyze_listing_detail() {
        let response = analyze(request(json!({
            "listing_detail": { "data": { "home": { "list_price": 300000, "property_id": "M9" } } },
            "gross_rents": 30000
        })))
        .unwrap();

        assert_eq!(response.property.property_id.as_deref(), Some("M9"));
        assert_eq!(response.property.gross_rents, Some(30_000.0));
        assert!(!response.calculation.is_fallback());
    }

    #[test]
    fn test_non_numeric_assumption_falls_back() {
        let response = analyze(request(json!({
            "property": { "offer_price": 500000 },
            "assumptions": { "vacancyRate": "high" }
        })))
        .unwrap();

        assert!(response.calculation.is_fallback());
        assert_eq!(response.assumptions["vacancyRate"], json!("high"));
    }

    #[test]
    fn test_echoed_assumptions_match_calculation() {
        let response = analyze(request(json!({
            "property": { "offer_price": 500000, "fair_market_value": 500000, "number_of_units": 2, "gross_rents": 48000 },
            "assumptions": { "deposit": 20000, "depositWithOffer": 9000 }
        })))
        .unwrap();

        assert_eq!(response.assumptions["depositWithOffer"], json!(20000.0));
        let result = response.calculation.result().unwrap();
        assert_eq!(result.cash_required_to_close, 102_300.0);
    }

    #[test]
    fn test_missing_property_is_rejected() {
        assert!(analyze(request(json!({}))).is_err());
    }
}
