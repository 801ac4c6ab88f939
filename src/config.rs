use crate::domain::{Decimal, MarketTable};
use crate::engine::pipeline::DEFAULT_LOGO_SERVICE_URL;
use crate::engine::{IrrMethod, FREIGHT_COST_PER_UNIT_KM};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub freight_cost_per_unit_km: Decimal,
    pub logo_service_url: String,
    pub irr_method: IrrMethod,
    /// CSV file replacing the built-in market table, if set.
    pub market_logistics_file: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
    #[error("Failed to load {0}: {1}")]
    Catalog(String, crate::catalog::CatalogError),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            freight_cost_per_unit_km: FREIGHT_COST_PER_UNIT_KM,
            logo_service_url: DEFAULT_LOGO_SERVICE_URL.to_string(),
            irr_method: IrrMethod::Scan,
            market_logistics_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let freight_cost_per_unit_km = match env_map.get("FREIGHT_COST_PER_UNIT_KM") {
            Some(raw) => Decimal::from_str_canonical(raw)
                .ok()
                .filter(|rate| !rate.is_negative())
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "FREIGHT_COST_PER_UNIT_KM".to_string(),
                        "must be a non-negative decimal".to_string(),
                    )
                })?,
            None => FREIGHT_COST_PER_UNIT_KM,
        };

        let logo_service_url = env_map
            .get("LOGO_SERVICE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOGO_SERVICE_URL.to_string());

        let irr_method = match env_map
            .get("IRR_METHOD")
            .map(|s| s.as_str())
            .unwrap_or("scan")
        {
            "scan" => IrrMethod::Scan,
            "bisection" => IrrMethod::Bisection,
            other => {
                return Err(ConfigError::InvalidValue(
                    "IRR_METHOD".to_string(),
                    format!("must be scan or bisection, got {}", other),
                ))
            }
        };

        let market_logistics_file = env_map
            .get("MARKET_LOGISTICS_FILE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Config {
            port,
            freight_cost_per_unit_km,
            logo_service_url,
            irr_method,
            market_logistics_file,
        })
    }

    /// Market table from `MARKET_LOGISTICS_FILE`, or the built-in table.
    pub fn load_markets(&self) -> Result<MarketTable, ConfigError> {
        match &self.market_logistics_file {
            Some(path) => {
                let table = crate::catalog::load_market_table(path)
                    .map_err(|e| ConfigError::Catalog("MARKET_LOGISTICS_FILE".to_string(), e))?;
                tracing::info!("Loaded {} markets from {}", table.len(), path);
                Ok(table)
            }
            None => Ok(crate::catalog::seed_markets()),
        }
    }
}
