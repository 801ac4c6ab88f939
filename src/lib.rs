pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod format;

pub use config::Config;
pub use domain::{
    Deal, DealId, Decimal, MarketKey, MarketLogistics, MarketTable, ScenarioParams, Stage,
};
pub use engine::{
    apply_stage_change, compute_landed_cost, enrich_deals, evaluate_scenario, summarize,
    EnrichedDeal, LandedCostBreakdown, PipelineSummary, ScenarioResult,
};
pub use error::AppError;
