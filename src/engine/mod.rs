//! Pure computation engines: landed cost, deal enrichment and the ROI model.

pub mod landed_cost;
pub mod pipeline;
pub mod scenario;

pub use landed_cost::{
    compute_landed_cost, compute_landed_cost_with_rate, LandedCostBreakdown,
    FREIGHT_COST_PER_UNIT_KM,
};
pub use pipeline::{
    apply_stage_change, enrich_deals, summarize, DealEnricher, DealFilter, EnrichedDeal,
    PayoutAmount, PipelineSummary, StageTotals,
};
pub use scenario::{
    evaluate_scenario, evaluate_scenario_with, IrrEstimate, IrrMethod, Payback, ScenarioResult,
    WaterfallBar,
};
