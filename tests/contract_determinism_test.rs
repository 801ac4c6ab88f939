//! Contract and determinism tests for the JSON endpoints.
//!
//! - Contract validation: field names (camelCase), types, required fields
//! - Determinism: same request twice = identical bytes

use axum::http::StatusCode;
use serde_json::Value;
use tower::util::ServiceExt;
use vaporval::api::{self, AppState};
use vaporval::config::Config;
use vaporval::engine::IrrMethod;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn setup_test_app(irr_method: IrrMethod) -> axum::Router {
    let config = Config {
        port: 0,
        irr_method,
        ..Config::default()
    };
    api::create_router(AppState::from_config(config).expect("seed state"))
}

async fn request(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn assert_has_fields(value: &Value, fields: &[&str]) {
    let obj = value.as_object().expect("expected JSON object");
    for field in fields {
        assert!(obj.contains_key(*field), "missing field {}", field);
    }
}

fn assert_no_snake_case_keys(value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                assert!(!key.contains('_'), "snake_case key {}", key);
                assert_no_snake_case_keys(child);
            }
        }
        Value::Array(items) => items.iter().for_each(assert_no_snake_case_keys),
        _ => {}
    }
}

// =============================================================================
// Contract
// =============================================================================

#[tokio::test]
async fn test_enriched_deal_contract() {
    let app = setup_test_app(IrrMethod::Scan);
    let (status, body) = request(app, "/v1/deals/deal-jordan").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_has_fields(
        &json,
        &[
            "id",
            "name",
            "domain",
            "stage",
            "potential",
            "marketKey",
            "payouts",
            "logoUrl",
            "marketFound",
            "landedCost",
            "profitPerUnit",
            "directSalesProfit",
            "value",
            "totalLeaseValue",
            "payoutAmounts",
        ],
    );
    assert!(json.get("logo").is_none());
    assert!(json["value"].is_number());
    assert!(json["stage"].is_string());
    assert_has_fields(
        &json["landedCost"],
        &["baseCost", "freight", "duty", "vat", "total"],
    );
    assert_has_fields(
        &json["potential"]["directSales"],
        &["units", "pricePerUnit", "costPerUnit"],
    );
    assert_has_fields(
        &json["potential"]["leaseModel"],
        &["units", "monthlyLease", "termMonths"],
    );
    assert_eq!(json["payoutAmounts"][0]["amount"], 6876.0);

    // Stage values are the only snake_case strings; keys never are.
    assert_no_snake_case_keys(&json);
}

#[tokio::test]
async fn test_scenario_contract() {
    let app = setup_test_app(IrrMethod::Scan);
    let (status, body) = request(app, "/v1/scenario/default").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_has_fields(
        &json,
        &[
            "params",
            "annualOperatingDays",
            "annualVolumeLiters",
            "grossRevenue",
            "annualOpex",
            "annualDepreciation",
            "netProfit",
            "payback",
            "co2ReductionTons",
            "carbonCreditValue",
            "totalAnnualValue",
            "waterfall",
            "projection",
            "npv",
            "irr",
            "display",
        ],
    );
    assert_has_fields(
        &json["waterfall"][0],
        &["name", "kind", "value", "cumulative", "range"],
    );
    assert_eq!(json["waterfall"][0]["kind"], "increase");
    assert_eq!(json["waterfall"][1]["kind"], "decrease");
    assert_eq!(json["waterfall"][4]["kind"], "total");
    assert_eq!(json["waterfall"][0]["range"].as_array().unwrap().len(), 2);
    assert_has_fields(
        &json["irr"],
        &["ratePercent", "npvAtRate", "rootInRange", "method"],
    );
    assert_no_snake_case_keys(&json["params"]);
    assert_no_snake_case_keys(&json["display"]);
}

#[tokio::test]
async fn test_summary_contract() {
    let app = setup_test_app(IrrMethod::Scan);
    let (status, body) = request(app, "/v1/pipeline/summary").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_has_fields(
        &json,
        &[
            "stages",
            "dealCount",
            "totalValue",
            "totalValueDisplay",
            "totalLeaseValue",
            "totalLeaseValueDisplay",
        ],
    );
    let stages: Vec<&str> = json["stages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["stage"].as_str().unwrap())
        .collect();
    assert_eq!(
        stages,
        vec![
            "prospect",
            "qualified",
            "proposal",
            "on_hold",
            "awaiting_funding",
            "closed_won",
            "closed_lost"
        ]
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[tokio::test]
async fn test_endpoints_are_byte_deterministic() {
    let uris = [
        "/v1/markets",
        "/v1/deals",
        "/v1/deals/deal-kenya",
        "/v1/pipeline/summary",
        "/v1/pipeline/export.csv",
        "/v1/landed-cost?baseCost=25000&market=jordan",
        "/v1/scenario/default",
    ];

    for uri in uris {
        let (status_a, body_a) = request(setup_test_app(IrrMethod::Scan), uri).await;
        let (status_b, body_b) = request(setup_test_app(IrrMethod::Scan), uri).await;
        assert_eq!(status_a, StatusCode::OK, "{}", uri);
        assert_eq!(status_a, status_b, "{}", uri);
        assert_eq!(body_a, body_b, "non-deterministic body for {}", uri);
    }
}

#[tokio::test]
async fn test_irr_methods_agree_through_api() {
    let (_, scan) = request(setup_test_app(IrrMethod::Scan), "/v1/scenario/default").await;
    let (_, bisect) = request(setup_test_app(IrrMethod::Bisection), "/v1/scenario/default").await;

    let scan: Value = serde_json::from_slice(&scan).unwrap();
    let bisect: Value = serde_json::from_slice(&bisect).unwrap();
    assert_eq!(bisect["irr"]["method"], "bisection");

    let a = scan["irr"]["ratePercent"].as_f64().unwrap();
    let b = bisect["irr"]["ratePercent"].as_f64().unwrap();
    assert!((a - b).abs() <= 0.1 + 1e-9, "scan {} vs bisection {}", a, b);

    // Everything other than the IRR block is identical.
    assert_eq!(scan["npv"], bisect["npv"]);
    assert_eq!(scan["waterfall"], bisect["waterfall"]);
}
