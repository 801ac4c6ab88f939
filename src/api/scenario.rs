use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::domain::ScenarioParams;
use crate::engine::{evaluate_scenario_with, ScenarioResult};
use crate::error::AppError;
use crate::format::{format_currency, format_payback, format_percent};

/// Preformatted strings for the calculator readouts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDisplay {
    pub gross_revenue: String,
    pub annual_opex: String,
    pub net_profit: String,
    pub carbon_credit_value: String,
    pub total_annual_value: String,
    pub npv: String,
    pub irr: String,
    pub payback: String,
    pub co2_reduction_tons: String,
}

impl From<&ScenarioResult> for ScenarioDisplay {
    fn from(r: &ScenarioResult) -> Self {
        Self {
            gross_revenue: format_currency(r.gross_revenue),
            annual_opex: format_currency(r.annual_opex),
            net_profit: format_currency(r.net_profit),
            carbon_credit_value: format_currency(r.carbon_credit_value),
            total_annual_value: format_currency(r.total_annual_value),
            npv: format_currency(r.npv),
            irr: format_percent(r.irr.rate_percent),
            payback: format_payback(&r.payback),
            co2_reduction_tons: format!("{:.1}", r.co2_reduction_tons.round_dp(1).inner()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResponse {
    #[serde(flatten)]
    pub result: ScenarioResult,
    pub display: ScenarioDisplay,
}

fn respond(state: &AppState, params: &ScenarioParams) -> ScenarioResponse {
    let result = evaluate_scenario_with(params, state.config.irr_method);
    ScenarioResponse {
        display: ScenarioDisplay::from(&result),
        result,
    }
}

pub async fn post_scenario(
    State(state): State<AppState>,
    Json(params): Json<ScenarioParams>,
) -> Result<Json<ScenarioResponse>, AppError> {
    params.validate()?;
    Ok(Json(respond(&state, &params)))
}

pub async fn get_default_scenario(State(state): State<AppState>) -> Json<ScenarioResponse> {
    Json(respond(&state, &ScenarioParams::default()))
}
