use crate::domain::{Decimal, MarketKey, MarketLogistics, MarketTable};
use rust_decimal::Decimal as RustDecimal;
use rust_decimal_macros::dec;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read market file: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv parse error: {0}")]
    Csv(String),
    #[error("invalid number in column {column} for market {key}: {value}")]
    InvalidNumber {
        key: String,
        column: &'static str,
        value: String,
    },
    #[error("market {0} has a negative distance or a rate outside [0, 1)")]
    InvalidMarket(String),
    #[error("duplicate market key: {0}")]
    DuplicateKey(String),
}

fn market(
    port: &str,
    distance_km: RustDecimal,
    duty_rate: RustDecimal,
    vat_rate: RustDecimal,
) -> MarketLogistics {
    MarketLogistics::new(port, distance_km.into(), duty_rate.into(), vat_rate.into())
}

/// Built-in destination markets.
pub fn seed_markets() -> MarketTable {
    [
        ("jordan", market("Aqaba", dec!(10000), dec!(0.05), dec!(0.16))),
        ("uae", market("Jebel Ali", dec!(6500), dec!(0.05), dec!(0.05))),
        ("saudi", market("Dammam", dec!(7200), dec!(0.05), dec!(0.15))),
        ("egypt", market("Alexandria", dec!(3000), dec!(0.05), dec!(0.14))),
        ("kenya", market("Mombasa", dec!(9000), dec!(0.25), dec!(0.16))),
        ("nigeria", market("Lagos", dec!(7000), dec!(0.10), dec!(0.075))),
        ("india", market("Nhava Sheva", dec!(8500), dec!(0.075), dec!(0.18))),
        ("mexico", market("Veracruz", dec!(9500), dec!(0), dec!(0.16))),
    ]
    .into_iter()
    .map(|(key, m)| (MarketKey::new(key), m))
    .collect()
}

/// Load a market table from a CSV file.
///
/// Columns: `key,destination_port,distance_km,duty_rate,vat_rate`.
pub fn load_market_table(path: impl AsRef<Path>) -> Result<MarketTable, CatalogError> {
    let bytes = std::fs::read(path)?;
    parse_market_csv(&bytes)
}

pub fn parse_market_csv(csv_bytes: &[u8]) -> Result<MarketTable, CatalogError> {
    #[derive(Debug, serde::Deserialize)]
    struct Row {
        key: String,
        destination_port: String,
        distance_km: String,
        duty_rate: String,
        vat_rate: String,
    }

    fn number(key: &str, column: &'static str, value: &str) -> Result<Decimal, CatalogError> {
        Decimal::from_str_canonical(value).map_err(|_| CatalogError::InvalidNumber {
            key: key.to_string(),
            column,
            value: value.to_string(),
        })
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_bytes);

    let mut table = MarketTable::new();
    for record in reader.deserialize::<Row>() {
        let row = record.map_err(|e| CatalogError::Csv(e.to_string()))?;
        let logistics = MarketLogistics::new(
            row.destination_port,
            number(&row.key, "distance_km", &row.distance_km)?,
            number(&row.key, "duty_rate", &row.duty_rate)?,
            number(&row.key, "vat_rate", &row.vat_rate)?,
        );
        if !logistics.is_valid() {
            return Err(CatalogError::InvalidMarket(row.key));
        }
        let key = MarketKey::new(&row.key);
        if table.insert(key, logistics).is_some() {
            return Err(CatalogError::DuplicateKey(row.key));
        }
    }

    Ok(table)
}
