//! Seed data: the destination-market table and the sales pipeline.
//!
//! Both are supplied in memory; the market table may be replaced at startup
//! from a CSV file.

pub mod deals;
pub mod markets;

pub use deals::seed_deals;
pub use markets::{load_market_table, parse_market_csv, seed_markets, CatalogError};
