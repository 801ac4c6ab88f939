//! Domain types for the valuation engine.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Identifiers: DealId, MarketKey
//! - Market logistics and the market lookup table
//! - Deals, pipeline stages and payouts
//! - ROI scenario parameters and their validation

pub mod deal;
pub mod decimal;
pub mod market;
pub mod primitives;
pub mod scenario;

pub use deal::{Deal, DirectSales, LeaseModel, Payout, Potential, Stage, StageParseError};
pub use decimal::Decimal;
pub use market::{MarketLogistics, MarketTable};
pub use primitives::{DealId, MarketKey};
pub use scenario::{
    ScenarioError, ScenarioParams, MAX_DISCOUNT_RATE_PERCENT, MAX_SCENARIO_AMOUNT,
    MIN_DISCOUNT_RATE_PERCENT,
};
