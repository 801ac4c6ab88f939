use vaporval::catalog::{seed_deals, seed_markets};
use vaporval::domain::{DirectSales, LeaseModel, Potential};
use vaporval::engine::scenario::{estimate_irr, npv, IrrMethod};
use vaporval::engine::{evaluate_scenario_with, DealEnricher, Payback};
use vaporval::{
    apply_stage_change, compute_landed_cost, enrich_deals, evaluate_scenario, summarize, Deal,
    DealId, Decimal, MarketKey, MarketLogistics, ScenarioParams, Stage,
};

fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

fn deal(id: &str, market: &str, units: &str, price: &str, cost: &str) -> Deal {
    Deal {
        id: DealId::new(id),
        name: id.to_string(),
        domain: format!("{}.example", id),
        logo: None,
        stage: Stage::Prospect,
        potential: Potential {
            direct_sales: DirectSales {
                units: d(units),
                price_per_unit: d(price),
                cost_per_unit: d(cost),
            },
            lease_model: LeaseModel {
                units: d(units),
                monthly_lease: d("0"),
                term_months: d("0"),
            },
        },
        market_key: MarketKey::new(market),
        payouts: vec![],
    }
}

#[test]
fn test_landed_cost_never_below_base_for_seed_markets() {
    let markets = seed_markets();
    for base in ["0", "0.01", "100", "25000", "1000000"] {
        for (key, market) in markets.iter() {
            let breakdown = compute_landed_cost(d(base), Some(market));
            assert!(breakdown.total >= d(base), "market {}", key);
        }
    }
}

#[test]
fn test_landed_cost_missing_market() {
    let breakdown = compute_landed_cost(d("100"), None);
    assert_eq!(breakdown.base_cost, d("100"));
    assert_eq!(breakdown.freight, Decimal::zero());
    assert_eq!(breakdown.duty, Decimal::zero());
    assert_eq!(breakdown.vat, Decimal::zero());
    assert_eq!(breakdown.total, d("100"));
}

#[test]
fn test_landed_cost_jordan_stacking() {
    let markets = seed_markets();
    let jordan = markets.get(&MarketKey::new("jordan"));
    let breakdown = compute_landed_cost(d("25000"), jordan);

    assert_eq!(breakdown.freight, d("5000"));
    assert_eq!(breakdown.duty, d("1500"));
    assert_eq!(breakdown.vat, d("5040"));
    assert_eq!(breakdown.total, d("36540"));
}

#[test]
fn test_duty_applies_to_freight_and_vat_to_duty() {
    let market = MarketLogistics::new("Test", d("1000"), d("0.1"), d("0.2"));
    let breakdown = compute_landed_cost(d("1000"), Some(&market));

    // freight 500; duty on 1500; vat on 1650
    assert_eq!(breakdown.duty, d("150"));
    assert_eq!(breakdown.vat, d("330"));
    assert_eq!(breakdown.total, d("1980"));
}

#[test]
fn test_clamped_value_and_signed_detail() {
    let markets = seed_markets();
    let enriched = enrich_deals(&[deal("under", "jordan", "3", "30000", "25000")], &markets);
    let e = &enriched[0];

    assert_eq!(e.profit_per_unit, d("-6540"));
    assert_eq!(e.direct_sales_profit, d("-19620"));
    assert_eq!(e.value, Decimal::zero());
    assert_eq!(summarize(&enriched).total_value, Decimal::zero());
}

#[test]
fn test_enrichment_is_idempotent() {
    let deals = seed_deals();
    let markets = seed_markets();

    let first = enrich_deals(&deals, &markets);
    let second = enrich_deals(&deals, &markets);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn test_unknown_market_degrades_without_failing() {
    let markets = seed_markets();
    let enriched = enrich_deals(&[deal("lost", "atlantis", "2", "30000", "25000")], &markets);

    assert!(!enriched[0].market_found);
    assert_eq!(enriched[0].landed_cost.total, d("25000"));
    assert_eq!(enriched[0].value, d("10000"));
}

#[test]
fn test_freight_rate_override() {
    let markets = seed_markets();
    let enricher = DealEnricher::new(&markets).with_freight_rate(Decimal::zero());
    let e = enricher.enrich(&deal("j", "jordan", "1", "50000", "25000"));

    // 25000 * 1.05 * 1.16
    assert_eq!(e.landed_cost.freight, Decimal::zero());
    assert_eq!(e.landed_cost.total, d("30450"));
}

#[test]
fn test_stage_change_is_recomputed_in_summary() {
    let markets = seed_markets();
    let deals = seed_deals();
    let before = summarize(&enrich_deals(&deals, &markets));

    let moved = apply_stage_change(&deals, &DealId::new("deal-jordan"), Stage::ClosedLost);
    let after = summarize(&enrich_deals(&moved, &markets));

    let jordan_value = d("45840");
    assert_eq!(
        after.stage(Stage::Proposal).unwrap().value,
        before.stage(Stage::Proposal).unwrap().value - jordan_value
    );
    assert_eq!(
        after.stage(Stage::ClosedLost).unwrap().value,
        before.stage(Stage::ClosedLost).unwrap().value + jordan_value
    );
    assert_eq!(after.total_value, before.total_value);
}

#[test]
fn test_irr_scan_minimizes_npv_and_brackets_root() {
    let params = ScenarioParams::default();
    let result = evaluate_scenario(&params);
    let annual = result.total_annual_value;
    let capex = result.params.capex;
    assert!(annual.is_positive());

    let irr = result.irr;
    assert!(irr.root_in_range);

    let step = d("0.1");
    for neighbour in [irr.rate_percent - step, irr.rate_percent + step] {
        if neighbour.is_negative() || neighbour > d("100") {
            continue;
        }
        assert!(irr.npv_at_rate.abs() <= npv(annual, capex, neighbour).abs());
    }
    let below = npv(annual, capex, irr.rate_percent - step);
    let above = npv(annual, capex, irr.rate_percent + step);
    assert!(!below.is_negative());
    assert!(!above.is_positive());
}

#[test]
fn test_bisection_matches_scan_within_step() {
    let params = ScenarioParams::default();
    let scan = evaluate_scenario_with(&params, IrrMethod::Scan).irr;
    let bisect = evaluate_scenario_with(&params, IrrMethod::Bisection).irr;

    assert_eq!(bisect.method, IrrMethod::Bisection);
    assert!((scan.rate_percent - bisect.rate_percent).abs() <= d("0.1"));
    assert!(bisect.npv_at_rate.abs() <= scan.npv_at_rate.abs());
}

#[test]
fn test_irr_helper_for_break_even_at_zero() {
    // 5 x 200 exactly repays 1000 at 0%.
    let irr = estimate_irr(d("200"), d("1000"), IrrMethod::Scan);
    assert_eq!(irr.rate_percent, Decimal::zero());
    assert!(irr.npv_at_rate.is_zero());
    assert!(irr.root_in_range);
}

#[test]
fn test_payback_not_recoverable_when_cash_profit_negative() {
    let params = ScenarioParams {
        daily_vapor_volume_liters: d("10"),
        ..ScenarioParams::default()
    };
    let result = evaluate_scenario(&params);
    assert!(!result.net_profit.is_positive());
    assert_eq!(result.payback, Payback::NotRecoverable);
}

#[test]
fn test_payback_immediate_without_capex() {
    let params = ScenarioParams {
        capex: Decimal::zero(),
        ..ScenarioParams::default()
    };
    let result = evaluate_scenario(&params);
    assert_eq!(result.payback, Payback::Immediate);
    assert_eq!(result.annual_depreciation, Decimal::zero());
}

#[test]
fn test_waterfall_final_total_for_default_scenario() {
    let result = evaluate_scenario(&ScenarioParams::default());
    let expected = result.gross_revenue - result.annual_opex - result.annual_depreciation
        + result.carbon_credit_value
        + result.params.annual_fines_avoided;

    let last = result.waterfall.last().unwrap();
    assert_eq!(last.cumulative, expected);
    assert_eq!(last.range, [Decimal::zero(), expected]);

    let mut running = Decimal::zero();
    for bar in &result.waterfall[..result.waterfall.len() - 1] {
        let low = running.min(running + bar.value);
        let high = running.max(running + bar.value);
        assert_eq!(bar.range, [low, high], "bar {}", bar.name);
        running = running + bar.value;
    }
}

#[test]
fn test_projection_matches_annual_value() {
    let result = evaluate_scenario(&ScenarioParams::default());
    for point in &result.projection {
        assert_eq!(
            point.cumulative_profit,
            -result.params.capex + result.total_annual_value * Decimal::from(point.year)
        );
    }
}

#[test]
fn test_out_of_range_inputs_are_clamped_not_propagated() {
    let params = ScenarioParams {
        daily_vapor_volume_liters: d("-100"),
        depreciation_period_years: d("-3"),
        discount_rate_percent: d("-500"),
        ..ScenarioParams::default()
    };
    let result = evaluate_scenario(&params);

    assert_eq!(result.gross_revenue, Decimal::zero());
    assert_eq!(result.annual_depreciation, Decimal::zero());
    assert_eq!(result.payback, Payback::NotRecoverable);
}
