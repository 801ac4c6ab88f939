//! ROI model for a vapor-recovery installation.
//!
//! Every call evaluates the full result from scratch. Inputs are sanitized
//! before use, which bounds every product below the decimal range, and every
//! division is guarded, so no result field can be produced by a division by
//! zero.

use crate::domain::{Decimal, ScenarioParams, MIN_DISCOUNT_RATE_PERCENT};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// kg of CO2 avoided per liter of recovered fuel.
pub const CO2_KG_PER_LITER: Decimal = Decimal::new(dec!(2.3));

/// Years covered by the projection and the NPV.
pub const PROJECTION_YEARS: u32 = 5;

const IRR_SCAN_MAX_PERCENT: Decimal = Decimal::new(dec!(100));
const IRR_SCAN_STEP_PERCENT: Decimal = Decimal::new(dec!(0.1));
const IRR_SCAN_STEPS: u32 = 1000;
const BISECTION_MAX_ITERATIONS: u32 = 60;
const BISECTION_TOLERANCE: Decimal = Decimal::new(dec!(0.000001));

/// How the IRR is searched for on [0%, 100%].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrMethod {
    /// Grid scan in 0.1 point steps keeping the rate with the smallest |NPV|.
    #[default]
    Scan,
    /// Bisection on NPV(r) = 0; agrees with the scan to within one step.
    Bisection,
}

/// Time to recover the capital outlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "months", rename_all = "snake_case")]
pub enum Payback {
    /// Nothing to recover (capex is zero).
    Immediate,
    Months(Decimal),
    /// Cash profit is zero or negative; capex is never recovered.
    NotRecoverable,
}

impl Payback {
    pub fn from_cash_profit(capex: Decimal, annual_net_profit: Decimal) -> Self {
        if !capex.is_positive() {
            return Payback::Immediate;
        }
        if !annual_net_profit.is_positive() {
            return Payback::NotRecoverable;
        }
        match capex.checked_div(annual_net_profit) {
            Some(years) => Payback::Months(years * Decimal::from(12i64)),
            None => Payback::NotRecoverable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarKind {
    Increase,
    Decrease,
    Total,
}

/// One bar of the annual cash-flow waterfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallBar {
    pub name: String,
    pub kind: BarKind,
    /// Signed contribution; for the terminal bar, the final total.
    pub value: Decimal,
    /// Running total after this bar.
    pub cumulative: Decimal,
    /// `[low, high]` drawn range. The terminal bar spans `[0, total]`.
    pub range: [Decimal; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub cumulative_profit: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrEstimate {
    pub rate_percent: Decimal,
    pub npv_at_rate: Decimal,
    /// NPV changes sign on [0, 100]; otherwise the rate is the best endpoint.
    pub root_in_range: bool,
    pub method: IrrMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    /// The sanitized inputs the result was computed from.
    pub params: ScenarioParams,
    pub annual_operating_days: Decimal,
    pub annual_volume_liters: Decimal,
    pub gross_revenue: Decimal,
    pub annual_opex: Decimal,
    pub annual_depreciation: Decimal,
    /// Cash profit before depreciation.
    pub net_profit: Decimal,
    pub payback: Payback,
    pub co2_reduction_tons: Decimal,
    pub carbon_credit_value: Decimal,
    pub total_annual_value: Decimal,
    pub waterfall: Vec<WaterfallBar>,
    pub projection: Vec<ProjectionPoint>,
    pub npv: Decimal,
    pub irr: IrrEstimate,
}

pub fn evaluate_scenario(params: &ScenarioParams) -> ScenarioResult {
    evaluate_scenario_with(params, IrrMethod::default())
}

pub fn evaluate_scenario_with(params: &ScenarioParams, irr_method: IrrMethod) -> ScenarioResult {
    let p = params.sanitized();
    if &p != params {
        tracing::debug!("Scenario inputs out of range were clamped before evaluation");
    }

    let annual_operating_days = Decimal::from(365i64) * p.uptime;
    let annual_volume_liters =
        p.daily_vapor_volume_liters * annual_operating_days * p.recovery_efficiency;
    let gross_revenue = annual_volume_liters * p.price_per_liter;

    let annual_opex = (p.monthly_energy_cost + p.monthly_maintenance_cost) * Decimal::from(12i64)
        + p.annual_consumables
        + p.annual_warranty;
    let annual_depreciation = p
        .capex
        .checked_div(p.depreciation_period_years)
        .unwrap_or_else(Decimal::zero);

    let net_profit = gross_revenue - annual_opex;
    let payback = Payback::from_cash_profit(p.capex, net_profit);

    let co2_reduction_tons = annual_volume_liters * CO2_KG_PER_LITER / Decimal::from(1000i64);
    let carbon_credit_value = co2_reduction_tons * p.carbon_price_per_ton;
    let credits = carbon_credit_value + p.annual_fines_avoided;
    let total_annual_value = net_profit + credits;

    let waterfall = build_waterfall(&[
        ("Revenue", gross_revenue),
        ("OpEx", -annual_opex),
        ("Depreciation", -annual_depreciation),
        ("Credits", credits),
    ]);
    let projection = project_cumulative_profit(p.capex, total_annual_value);
    let npv = npv(total_annual_value, p.capex, p.discount_rate_percent);
    let irr = estimate_irr(total_annual_value, p.capex, irr_method);

    ScenarioResult {
        annual_operating_days,
        annual_volume_liters,
        gross_revenue,
        annual_opex,
        annual_depreciation,
        net_profit,
        payback,
        co2_reduction_tons,
        carbon_credit_value,
        total_annual_value,
        waterfall,
        projection,
        npv,
        irr,
        params: p,
    }
}

/// Stack signed steps from zero and close with a "Net Value" total bar.
pub fn build_waterfall(steps: &[(&str, Decimal)]) -> Vec<WaterfallBar> {
    let mut bars = Vec::with_capacity(steps.len() + 1);
    let mut cumulative = Decimal::zero();

    for &(name, value) in steps {
        let before = cumulative;
        cumulative = before + value;
        let (kind, range) = if value.is_negative() {
            (BarKind::Decrease, [cumulative, before])
        } else {
            (BarKind::Increase, [before, cumulative])
        };
        bars.push(WaterfallBar {
            name: name.to_string(),
            kind,
            value,
            cumulative,
            range,
        });
    }

    bars.push(WaterfallBar {
        name: "Net Value".to_string(),
        kind: BarKind::Total,
        value: cumulative,
        cumulative,
        range: [Decimal::zero(), cumulative],
    });

    bars
}

/// Cumulative profit for years 0..=5; year 0 is the capital outlay.
pub fn project_cumulative_profit(capex: Decimal, annual_value: Decimal) -> Vec<ProjectionPoint> {
    (0..=PROJECTION_YEARS)
        .map(|year| ProjectionPoint {
            year,
            cumulative_profit: -capex + annual_value * Decimal::from(year),
        })
        .collect()
}

/// Five-year NPV of a level annual value against an up-front capex.
///
/// Rates at or below -99.9% are treated as -99.9% so discount factors stay
/// positive. A present value beyond the decimal range saturates at
/// [`Decimal::MAX`] / [`Decimal::MIN`] rather than being dropped.
pub fn npv(annual_value: Decimal, capex: Decimal, rate_percent: Decimal) -> Decimal {
    let rate = rate_percent.max(MIN_DISCOUNT_RATE_PERCENT) / Decimal::hundred();
    let factor = Decimal::one().saturating_add(rate);
    let saturated = if annual_value.is_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };

    let mut discount = Decimal::one();
    let mut present_value = Decimal::zero();
    for _ in 0..PROJECTION_YEARS {
        discount = match discount.checked_mul(factor) {
            Some(next) => next,
            // Later years discount to nothing.
            None => break,
        };
        let pv = annual_value.checked_div(discount).unwrap_or_else(|| {
            tracing::debug!("NPV term out of decimal range; saturating");
            saturated
        });
        present_value = present_value.saturating_add(pv);
    }
    present_value.saturating_sub(capex)
}

pub fn estimate_irr(annual_value: Decimal, capex: Decimal, method: IrrMethod) -> IrrEstimate {
    let npv_at = |r: Decimal| npv(annual_value, capex, r);
    let lo_npv = npv_at(Decimal::zero());
    let hi_npv = npv_at(IRR_SCAN_MAX_PERCENT);
    let root_in_range = lo_npv.is_zero()
        || hi_npv.is_zero()
        || lo_npv.is_positive() != hi_npv.is_positive();

    let rate_percent = match method {
        IrrMethod::Scan => scan_irr(&npv_at),
        IrrMethod::Bisection if root_in_range => bisect_irr(&npv_at, lo_npv),
        IrrMethod::Bisection => {
            // No sign change: the nearest-to-zero endpoint, as the scan would pick.
            if hi_npv.abs() < lo_npv.abs() {
                IRR_SCAN_MAX_PERCENT
            } else {
                Decimal::zero()
            }
        }
    };

    IrrEstimate {
        rate_percent,
        npv_at_rate: npv_at(rate_percent),
        root_in_range,
        method,
    }
}

/// Rate on the 0.1-point grid over [0, 100] minimizing |NPV|; first minimum wins.
fn scan_irr(npv_at: &impl Fn(Decimal) -> Decimal) -> Decimal {
    let mut best_rate = Decimal::zero();
    let mut best_abs = npv_at(best_rate).abs();

    for step in 1..=IRR_SCAN_STEPS {
        let rate = IRR_SCAN_STEP_PERCENT * Decimal::from(step);
        let abs = npv_at(rate).abs();
        if abs < best_abs {
            best_abs = abs;
            best_rate = rate;
        }
    }
    best_rate
}

fn bisect_irr(npv_at: &impl Fn(Decimal) -> Decimal, lo_npv: Decimal) -> Decimal {
    let mut lo = Decimal::zero();
    let mut hi = IRR_SCAN_MAX_PERCENT;
    let lo_positive = lo_npv.is_positive();
    let two = Decimal::from(2i64);

    if lo_npv.is_zero() {
        return lo;
    }

    for _ in 0..BISECTION_MAX_ITERATIONS {
        let mid = (lo + hi) / two;
        let value = npv_at(mid);
        if value.is_zero() || hi - lo < BISECTION_TOLERANCE {
            return mid.round_dp(4);
        }
        if value.is_positive() == lo_positive {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    ((lo + hi) / two).round_dp(4)
}
