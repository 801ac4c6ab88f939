pub mod deals;
pub mod health;
pub mod markets;
pub mod pipeline;
pub mod scenario;

use crate::catalog::seed_deals;
use crate::config::Config;
use crate::domain::{Deal, MarketTable};
use crate::engine::{DealEnricher, EnrichedDeal};
use crate::error::AppError;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

/// Shared service state.
///
/// The deal list is the only mutable state; stage changes replace it wholesale
/// under the write lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub markets: Arc<MarketTable>,
    pub deals: Arc<RwLock<Vec<Deal>>>,
}

impl AppState {
    pub fn new(config: Config, markets: MarketTable, deals: Vec<Deal>) -> Self {
        Self {
            config,
            markets: Arc::new(markets),
            deals: Arc::new(RwLock::new(deals)),
        }
    }

    /// State seeded with the built-in deals and the configured market table.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let markets = config.load_markets()?;
        Ok(Self::new(config, markets, seed_deals()))
    }

    pub fn enricher(&self) -> DealEnricher<'_> {
        DealEnricher::new(&self.markets)
            .with_freight_rate(self.config.freight_cost_per_unit_km)
            .with_logo_service(self.config.logo_service_url.clone())
    }

    /// Snapshot of the deal list, enriched outside the lock.
    pub async fn enriched_deals(&self) -> Vec<EnrichedDeal> {
        let deals = self.deals.read().await.clone();
        self.enricher().enrich_all(&deals)
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/markets", get(markets::get_markets))
        .route("/v1/landed-cost", get(markets::get_landed_cost))
        .route("/v1/deals", get(deals::get_deals))
        .route("/v1/deals/:id", get(deals::get_deal))
        .route("/v1/deals/:id/stage", put(deals::put_deal_stage))
        .route("/v1/pipeline/summary", get(pipeline::get_summary))
        .route("/v1/pipeline/export.csv", get(pipeline::export_csv))
        .route("/v1/scenario", post(scenario::post_scenario))
        .route("/v1/scenario/default", get(scenario::get_default_scenario))
        .layer(cors)
        .with_state(state)
}
