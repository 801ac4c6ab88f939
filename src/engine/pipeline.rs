//! Deal enrichment and pipeline aggregation.
//!
//! Enriched deals are derived from the source deals on every call and never
//! cached; the only mutation is [`apply_stage_change`], which returns a new list.

use crate::domain::{Deal, DealId, Decimal, MarketTable, Stage};
use crate::engine::landed_cost::{
    compute_landed_cost_with_rate, LandedCostBreakdown, FREIGHT_COST_PER_UNIT_KM,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOGO_SERVICE_URL: &str = "https://logo.clearbit.com";

/// A payee's share of the deal's pipeline value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutAmount {
    pub name: String,
    pub percentage: Decimal,
    pub amount: Decimal,
}

/// A deal plus its derived financials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedDeal {
    #[serde(flatten)]
    pub deal: Deal,
    pub logo_url: String,
    /// Whether the deal's market key resolved to logistics data.
    pub market_found: bool,
    pub landed_cost: LandedCostBreakdown,
    /// Signed; negative when the unit sells below landed cost.
    pub profit_per_unit: Decimal,
    /// Signed; `profit_per_unit * units`.
    pub direct_sales_profit: Decimal,
    /// `direct_sales_profit` clamped at zero, for board and aggregate totals only.
    pub value: Decimal,
    pub total_lease_value: Decimal,
    pub payout_amounts: Vec<PayoutAmount>,
}

/// Derives [`EnrichedDeal`]s from deals and the market table.
#[derive(Debug, Clone)]
pub struct DealEnricher<'a> {
    markets: &'a MarketTable,
    freight_rate_per_km: Decimal,
    logo_service_url: String,
}

impl<'a> DealEnricher<'a> {
    pub fn new(markets: &'a MarketTable) -> Self {
        Self {
            markets,
            freight_rate_per_km: FREIGHT_COST_PER_UNIT_KM,
            logo_service_url: DEFAULT_LOGO_SERVICE_URL.to_string(),
        }
    }

    pub fn with_freight_rate(mut self, freight_rate_per_km: Decimal) -> Self {
        self.freight_rate_per_km = freight_rate_per_km;
        self
    }

    pub fn with_logo_service(mut self, url: impl Into<String>) -> Self {
        self.logo_service_url = url.into();
        self
    }

    pub fn enrich(&self, deal: &Deal) -> EnrichedDeal {
        let market = self.markets.get(&deal.market_key);
        if market.is_none() {
            tracing::debug!(
                deal = %deal.id,
                market = %deal.market_key,
                "No logistics data for market; landed cost falls back to base cost"
            );
        }

        let sales = &deal.potential.direct_sales;
        let landed_cost =
            compute_landed_cost_with_rate(sales.cost_per_unit, market, self.freight_rate_per_km);

        let profit_per_unit = sales.price_per_unit - landed_cost.total;
        let direct_sales_profit = profit_per_unit * sales.units;
        let value = direct_sales_profit.max(Decimal::zero());

        let lease = &deal.potential.lease_model;
        let total_lease_value = lease.units * lease.monthly_lease * lease.term_months;

        let payout_amounts = deal
            .payouts
            .iter()
            .map(|p| PayoutAmount {
                name: p.name.clone(),
                percentage: p.percentage,
                amount: value * p.percentage / Decimal::hundred(),
            })
            .collect();

        EnrichedDeal {
            logo_url: self.logo_url(deal),
            market_found: market.is_some(),
            landed_cost,
            profit_per_unit,
            direct_sales_profit,
            value,
            total_lease_value,
            payout_amounts,
            deal: deal.clone(),
        }
    }

    pub fn enrich_all(&self, deals: &[Deal]) -> Vec<EnrichedDeal> {
        deals.iter().map(|deal| self.enrich(deal)).collect()
    }

    fn logo_url(&self, deal: &Deal) -> String {
        match deal.logo.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(explicit) => explicit.to_string(),
            None => format!(
                "{}/{}",
                self.logo_service_url.trim_end_matches('/'),
                deal.domain.trim()
            ),
        }
    }
}

/// Enrich deals with the default freight rate and logo service.
pub fn enrich_deals(deals: &[Deal], markets: &MarketTable) -> Vec<EnrichedDeal> {
    DealEnricher::new(markets).enrich_all(deals)
}

/// Move one deal to a new stage, returning the updated list.
///
/// Any stage may move to any other. An unknown id leaves the list unchanged.
pub fn apply_stage_change(deals: &[Deal], deal_id: &DealId, new_stage: Stage) -> Vec<Deal> {
    deals
        .iter()
        .map(|deal| {
            if &deal.id == deal_id {
                deal.with_stage(new_stage)
            } else {
                deal.clone()
            }
        })
        .collect()
}

/// Board filter: free-text search on name/domain plus an optional stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealFilter {
    pub query: Option<String>,
    pub stage: Option<Stage>,
}

impl DealFilter {
    pub fn matches(&self, deal: &Deal) -> bool {
        if let Some(stage) = self.stage {
            if deal.stage != stage {
                return false;
            }
        }

        match self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let q = q.to_lowercase();
                deal.name.to_lowercase().contains(&q) || deal.domain.to_lowercase().contains(&q)
            }
            None => true,
        }
    }

    pub fn apply<'d>(&self, deals: &'d [EnrichedDeal]) -> Vec<&'d EnrichedDeal> {
        deals.iter().filter(|e| self.matches(&e.deal)).collect()
    }
}

/// Count and clamped value of the deals in one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTotals {
    pub stage: Stage,
    pub count: usize,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    /// One entry per stage in board order, including empty stages.
    pub stages: Vec<StageTotals>,
    pub total_value: Decimal,
    pub total_lease_value: Decimal,
    pub deal_count: usize,
}

impl PipelineSummary {
    pub fn stage(&self, stage: Stage) -> Option<&StageTotals> {
        self.stages.iter().find(|t| t.stage == stage)
    }
}

/// Sum clamped deal value per stage.
pub fn summarize<'d, I>(deals: I) -> PipelineSummary
where
    I: IntoIterator<Item = &'d EnrichedDeal>,
{
    let mut stages: Vec<StageTotals> = Stage::ALL
        .into_iter()
        .map(|stage| StageTotals {
            stage,
            count: 0,
            value: Decimal::zero(),
        })
        .collect();
    let mut total_lease_value = Decimal::zero();
    let mut deal_count = 0;

    for enriched in deals {
        if let Some(totals) = stages.iter_mut().find(|t| t.stage == enriched.deal.stage) {
            totals.count += 1;
            totals.value = totals.value + enriched.value;
        }
        total_lease_value = total_lease_value + enriched.total_lease_value;
        deal_count += 1;
    }

    PipelineSummary {
        total_value: stages.iter().map(|t| t.value).sum(),
        stages,
        total_lease_value,
        deal_count,
    }
}
