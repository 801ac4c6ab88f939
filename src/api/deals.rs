use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{DealId, Stage};
use crate::engine::{apply_stage_change, DealFilter, EnrichedDeal};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealsQuery {
    pub q: Option<String>,
    pub stage: Option<String>,
}

impl DealsQuery {
    pub fn to_filter(&self) -> Result<DealFilter, AppError> {
        let stage = self
            .stage
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<Stage>)
            .transpose()?;

        Ok(DealFilter {
            query: self.q.clone(),
            stage,
        })
    }
}

pub async fn get_deals(
    Query(params): Query<DealsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrichedDeal>>, AppError> {
    let filter = params.to_filter()?;
    let deals = state
        .enriched_deals()
        .await
        .into_iter()
        .filter(|e| filter.matches(&e.deal))
        .collect();
    Ok(Json(deals))
}

pub async fn get_deal(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<EnrichedDeal>, AppError> {
    let id = DealId::new(id);
    let deal = state
        .deals
        .read()
        .await
        .iter()
        .find(|d| d.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("deal {}", id)))?;

    Ok(Json(state.enricher().enrich(&deal)))
}

#[derive(Debug, Deserialize)]
pub struct StageChangeRequest {
    pub stage: String,
}

pub async fn put_deal_stage(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<StageChangeRequest>,
) -> Result<Json<EnrichedDeal>, AppError> {
    let new_stage: Stage = body.stage.parse()?;
    let id = DealId::new(id);

    let (previous, updated) = {
        let mut deals = state.deals.write().await;
        let previous = deals
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.stage)
            .ok_or_else(|| AppError::NotFound(format!("deal {}", id)))?;

        let next = apply_stage_change(&deals, &id, new_stage);
        *deals = next;

        let updated = deals
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("deal {} lost during stage change", id)))?;
        (previous, updated)
    };

    tracing::info!(deal = %id, from = %previous, to = %new_stage, "Deal stage changed");

    Ok(Json(state.enricher().enrich(&updated)))
}
