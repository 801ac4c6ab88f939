//! ROI scenario assumptions.

use crate::domain::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on every amount, volume and price input.
///
/// At this bound the largest intermediate product (annual volume times price)
/// stays below 1e27, inside the decimal range.
pub const MAX_SCENARIO_AMOUNT: Decimal = Decimal::new(dec!(1000000000000));

pub const MIN_DISCOUNT_RATE_PERCENT: Decimal = Decimal::new(dec!(-99.9));
pub const MAX_DISCOUNT_RATE_PERCENT: Decimal = Decimal::new(dec!(1000));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{0} must not exceed 1000000000000")]
    TooLarge(&'static str),
    #[error("{0} must be a fraction between 0 and 1")]
    NotAFraction(&'static str),
    #[error("discountRatePercent must be greater than -100")]
    DiscountRateTooLow,
    #[error("discountRatePercent must not exceed 1000")]
    DiscountRateTooHigh,
}

/// A user-adjustable parameter set for one ROI evaluation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioParams {
    // Operational
    pub daily_vapor_volume_liters: Decimal,
    pub recovery_efficiency: Decimal,
    pub uptime: Decimal,

    // Financial
    pub price_per_liter: Decimal,
    pub capex: Decimal,
    pub monthly_energy_cost: Decimal,
    pub monthly_maintenance_cost: Decimal,
    pub annual_consumables: Decimal,
    pub annual_warranty: Decimal,
    pub depreciation_period_years: Decimal,
    pub discount_rate_percent: Decimal,

    // ESG
    pub carbon_price_per_ton: Decimal,
    pub annual_fines_avoided: Decimal,
}

impl Default for ScenarioParams {
    /// Starting position of the calculator sliders.
    fn default() -> Self {
        Self {
            daily_vapor_volume_liters: Decimal::new(dec!(500)),
            recovery_efficiency: Decimal::new(dec!(0.999)),
            uptime: Decimal::new(dec!(0.95)),
            price_per_liter: Decimal::new(dec!(0.85)),
            capex: Decimal::new(dec!(450000)),
            monthly_energy_cost: Decimal::new(dec!(2500)),
            monthly_maintenance_cost: Decimal::new(dec!(1500)),
            annual_consumables: Decimal::new(dec!(12000)),
            annual_warranty: Decimal::new(dec!(8000)),
            depreciation_period_years: Decimal::new(dec!(10)),
            discount_rate_percent: Decimal::new(dec!(8)),
            carbon_price_per_ton: Decimal::new(dec!(50)),
            annual_fines_avoided: Decimal::new(dec!(25000)),
        }
    }
}

impl ScenarioParams {
    fn amount_fields(&self) -> [(&'static str, Decimal); 10] {
        [
            ("dailyVaporVolumeLiters", self.daily_vapor_volume_liters),
            ("pricePerLiter", self.price_per_liter),
            ("capex", self.capex),
            ("monthlyEnergyCost", self.monthly_energy_cost),
            ("monthlyMaintenanceCost", self.monthly_maintenance_cost),
            ("annualConsumables", self.annual_consumables),
            ("annualWarranty", self.annual_warranty),
            ("depreciationPeriodYears", self.depreciation_period_years),
            ("carbonPricePerTon", self.carbon_price_per_ton),
            ("annualFinesAvoided", self.annual_fines_avoided),
        ]
    }

    /// Reject inputs the calculator sliders would never produce.
    ///
    /// # Errors
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (name, value) in self.amount_fields() {
            if value.is_negative() {
                return Err(ScenarioError::Negative(name));
            }
            if value > MAX_SCENARIO_AMOUNT {
                return Err(ScenarioError::TooLarge(name));
            }
        }

        for (name, value) in [
            ("recoveryEfficiency", self.recovery_efficiency),
            ("uptime", self.uptime),
        ] {
            if value.is_negative() || value > Decimal::one() {
                return Err(ScenarioError::NotAFraction(name));
            }
        }

        if self.discount_rate_percent <= -Decimal::hundred() {
            return Err(ScenarioError::DiscountRateTooLow);
        }
        if self.discount_rate_percent > MAX_DISCOUNT_RATE_PERCENT {
            return Err(ScenarioError::DiscountRateTooHigh);
        }

        Ok(())
    }

    /// Copy with every input forced into its valid range.
    ///
    /// Amounts are clamped to [0, `MAX_SCENARIO_AMOUNT`], fractions to [0, 1]
    /// and the discount rate to [-99.9, 1000] so discount factors stay positive.
    pub fn sanitized(&self) -> Self {
        let floor = |v: Decimal| v.clamp(Decimal::zero(), MAX_SCENARIO_AMOUNT);
        let fraction = |v: Decimal| v.clamp(Decimal::zero(), Decimal::one());

        Self {
            daily_vapor_volume_liters: floor(self.daily_vapor_volume_liters),
            recovery_efficiency: fraction(self.recovery_efficiency),
            uptime: fraction(self.uptime),
            price_per_liter: floor(self.price_per_liter),
            capex: floor(self.capex),
            monthly_energy_cost: floor(self.monthly_energy_cost),
            monthly_maintenance_cost: floor(self.monthly_maintenance_cost),
            annual_consumables: floor(self.annual_consumables),
            annual_warranty: floor(self.annual_warranty),
            depreciation_period_years: floor(self.depreciation_period_years),
            discount_rate_percent: self
                .discount_rate_percent
                .clamp(MIN_DISCOUNT_RATE_PERCENT, MAX_DISCOUNT_RATE_PERCENT),
            carbon_price_per_ton: floor(self.carbon_price_per_ton),
            annual_fines_avoided: floor(self.annual_fines_avoided),
        }
    }
}
