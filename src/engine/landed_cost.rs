//! Landed cost: freight, duty and VAT stacked on top of an ex-works unit cost.

use crate::domain::{Decimal, MarketLogistics};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Freight charged per unit per km from the manufacturing origin.
pub const FREIGHT_COST_PER_UNIT_KM: Decimal = Decimal::new(dec!(0.5));

/// Per-unit cost components at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandedCostBreakdown {
    pub base_cost: Decimal,
    pub freight: Decimal,
    pub duty: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

impl LandedCostBreakdown {
    /// Breakdown with no logistics cost at all.
    pub fn ex_works(base_cost: Decimal) -> Self {
        Self {
            base_cost,
            freight: Decimal::zero(),
            duty: Decimal::zero(),
            vat: Decimal::zero(),
            total: base_cost,
        }
    }
}

/// Landed cost at the default freight rate.
///
/// `None` means no logistics data exists for the market; the result is then
/// the base cost with zero freight, duty and VAT.
pub fn compute_landed_cost(
    base_cost_per_unit: Decimal,
    market: Option<&MarketLogistics>,
) -> LandedCostBreakdown {
    compute_landed_cost_with_rate(base_cost_per_unit, market, FREIGHT_COST_PER_UNIT_KM)
}

/// Landed cost with an explicit freight rate per unit-km.
///
/// Duty is charged on cost plus freight, VAT on cost plus freight plus duty.
pub fn compute_landed_cost_with_rate(
    base_cost_per_unit: Decimal,
    market: Option<&MarketLogistics>,
    freight_rate_per_km: Decimal,
) -> LandedCostBreakdown {
    let Some(market) = market else {
        return LandedCostBreakdown::ex_works(base_cost_per_unit);
    };

    let freight = market.distance_km * freight_rate_per_km;
    let cost_plus_freight = base_cost_per_unit + freight;
    let duty = cost_plus_freight * market.duty_rate;
    let cost_plus_duty = cost_plus_freight + duty;
    let vat = cost_plus_duty * market.vat_rate;

    LandedCostBreakdown {
        base_cost: base_cost_per_unit,
        freight,
        duty,
        vat,
        total: cost_plus_duty + vat,
    }
}
