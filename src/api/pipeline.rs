use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::api::deals::DealsQuery;
use crate::api::AppState;
use crate::domain::{Decimal, Stage};
use crate::engine::{summarize, EnrichedDeal};
use crate::error::AppError;
use crate::format::format_currency;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSummary {
    pub stage: Stage,
    pub label: &'static str,
    pub count: usize,
    pub value: Decimal,
    pub value_display: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummaryResponse {
    pub stages: Vec<StageSummary>,
    pub deal_count: usize,
    pub total_value: Decimal,
    pub total_value_display: String,
    pub total_lease_value: Decimal,
    pub total_lease_value_display: String,
}

/// Per-stage totals over the filtered deal set.
pub async fn get_summary(
    Query(params): Query<DealsQuery>,
    State(state): State<AppState>,
) -> Result<Json<PipelineSummaryResponse>, AppError> {
    let filter = params.to_filter()?;
    let enriched = state.enriched_deals().await;
    let summary = summarize(filter.apply(&enriched));

    Ok(Json(PipelineSummaryResponse {
        stages: summary
            .stages
            .iter()
            .map(|t| StageSummary {
                stage: t.stage,
                label: t.stage.label(),
                count: t.count,
                value: t.value,
                value_display: format_currency(t.value),
            })
            .collect(),
        deal_count: summary.deal_count,
        total_value: summary.total_value,
        total_value_display: format_currency(summary.total_value),
        total_lease_value: summary.total_lease_value,
        total_lease_value_display: format_currency(summary.total_lease_value),
    }))
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    name: &'a str,
    domain: &'a str,
    stage: &'static str,
    market: &'a str,
    market_found: bool,
    units: String,
    price_per_unit: String,
    landed_cost_per_unit: String,
    profit_per_unit: String,
    direct_sales_profit: String,
    value: String,
    total_lease_value: String,
}

impl<'a> From<&'a EnrichedDeal> for ExportRow<'a> {
    fn from(e: &'a EnrichedDeal) -> Self {
        let sales = &e.deal.potential.direct_sales;
        Self {
            id: e.deal.id.as_str(),
            name: &e.deal.name,
            domain: &e.deal.domain,
            stage: e.deal.stage.as_str(),
            market: e.deal.market_key.as_str(),
            market_found: e.market_found,
            units: sales.units.to_canonical_string(),
            price_per_unit: sales.price_per_unit.to_canonical_string(),
            landed_cost_per_unit: e.landed_cost.total.to_canonical_string(),
            profit_per_unit: e.profit_per_unit.to_canonical_string(),
            direct_sales_profit: e.direct_sales_profit.to_canonical_string(),
            value: e.value.to_canonical_string(),
            total_lease_value: e.total_lease_value.to_canonical_string(),
        }
    }
}

/// Render enriched deals as CSV with a header row.
pub fn write_pipeline_csv(deals: &[EnrichedDeal]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for deal in deals {
        writer
            .serialize(ExportRow::from(deal))
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let enriched = state.enriched_deals().await;
    let body = write_pipeline_csv(&enriched)?;
    tracing::info!("Exported {} deals as CSV", enriched.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"pipeline.csv\"",
            ),
        ],
        body,
    ))
}
