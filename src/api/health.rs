use axum::extract::State;
use axum::Json;

use crate::api::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the market table and the deal list are loaded.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let deals = state.deals.read().await.len();
    Json(serde_json::json!({
        "status": "ready",
        "markets": state.markets.len(),
        "deals": deals,
    }))
}
