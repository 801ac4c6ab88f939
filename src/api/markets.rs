use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{Decimal, MarketKey, MarketTable};
use crate::engine::{compute_landed_cost_with_rate, LandedCostBreakdown};
use crate::error::AppError;
use crate::format::{format_currency, format_fraction_as_percent};

pub async fn get_markets(State(state): State<AppState>) -> Json<MarketTable> {
    Json(state.markets.as_ref().clone())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandedCostQuery {
    pub base_cost: String,
    pub market: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandedCostDisplay {
    pub base_cost: String,
    pub freight: String,
    pub duty: String,
    pub vat: String,
    pub total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duty_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandedCostResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketKey>,
    pub market_found: bool,
    pub breakdown: LandedCostBreakdown,
    pub display: LandedCostDisplay,
}

pub async fn get_landed_cost(
    Query(params): Query<LandedCostQuery>,
    State(state): State<AppState>,
) -> Result<Json<LandedCostResponse>, AppError> {
    let base_cost = Decimal::from_str_canonical(&params.base_cost)
        .map_err(|_| AppError::BadRequest("Invalid baseCost".to_string()))?;
    if base_cost.is_negative() {
        return Err(AppError::BadRequest("baseCost must not be negative".to_string()));
    }

    let market_key = params
        .market
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(MarketKey::new);
    let market = market_key.as_ref().and_then(|key| state.markets.get(key));

    let breakdown =
        compute_landed_cost_with_rate(base_cost, market, state.config.freight_cost_per_unit_km);

    Ok(Json(LandedCostResponse {
        market_found: market.is_some(),
        market: market_key,
        display: LandedCostDisplay {
            base_cost: format_currency(breakdown.base_cost),
            freight: format_currency(breakdown.freight),
            duty: format_currency(breakdown.duty),
            vat: format_currency(breakdown.vat),
            total: format_currency(breakdown.total),
            duty_rate: market.map(|m| format_fraction_as_percent(m.duty_rate)),
            vat_rate: market.map(|m| format_fraction_as_percent(m.vat_rate)),
        },
        breakdown,
    }))
}
