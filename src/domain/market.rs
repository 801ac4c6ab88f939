//! Destination-market logistics and the lookup table keyed by market.

use crate::domain::{Decimal, MarketKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shipping and tax conditions for one destination market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketLogistics {
    /// Port of entry; display only.
    pub destination_port: String,
    /// Distance from the manufacturing origin in km; drives freight.
    pub distance_km: Decimal,
    /// Import duty as a fraction in [0, 1).
    pub duty_rate: Decimal,
    /// VAT as a fraction in [0, 1).
    pub vat_rate: Decimal,
}

impl MarketLogistics {
    pub fn new(
        destination_port: impl Into<String>,
        distance_km: Decimal,
        duty_rate: Decimal,
        vat_rate: Decimal,
    ) -> Self {
        Self {
            destination_port: destination_port.into(),
            distance_km,
            duty_rate,
            vat_rate,
        }
    }

    /// True when distance is non-negative and both rates are fractions in [0, 1).
    pub fn is_valid(&self) -> bool {
        let rate_ok = |r: Decimal| !r.is_negative() && r < Decimal::one();
        !self.distance_km.is_negative() && rate_ok(self.duty_rate) && rate_ok(self.vat_rate)
    }
}

/// Market logistics lookup table.
///
/// A missing key is an expected condition (no data for that market), so
/// lookups return `Option` and callers apply the zero-logistics fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketTable(BTreeMap<MarketKey, MarketLogistics>);

impl MarketTable {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: MarketKey, market: MarketLogistics) -> Option<MarketLogistics> {
        self.0.insert(key, market)
    }

    pub fn get(&self, key: &MarketKey) -> Option<&MarketLogistics> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &MarketKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&MarketKey, &MarketLogistics)> {
        self.0.iter()
    }
}

impl FromIterator<(MarketKey, MarketLogistics)> for MarketTable {
    fn from_iter<T: IntoIterator<Item = (MarketKey, MarketLogistics)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_lookup_missing_key_is_none() {
        let mut table = MarketTable::new();
        table.insert(
            MarketKey::new("jordan"),
            MarketLogistics::new("Aqaba", d("10000"), d("0.05"), d("0.16")),
        );

        assert!(table.get(&MarketKey::new("Jordan")).is_some());
        assert!(table.get(&MarketKey::new("atlantis")).is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_is_valid_rejects_out_of_range_rates() {
        assert!(MarketLogistics::new("A", d("1"), d("0"), d("0.99")).is_valid());
        assert!(!MarketLogistics::new("A", d("1"), d("1"), d("0")).is_valid());
        assert!(!MarketLogistics::new("A", d("1"), d("0"), d("-0.1")).is_valid());
        assert!(!MarketLogistics::new("A", d("-5"), d("0"), d("0")).is_valid());
    }

    #[test]
    fn test_table_serializes_as_map() {
        let table: MarketTable = vec![(
            MarketKey::new("uae"),
            MarketLogistics::new("Jebel Ali", d("6000"), d("0.05"), d("0.05")),
        )]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["uae"]["destinationPort"], "Jebel Ali");
        assert_eq!(json["uae"]["distanceKm"], 6000.0);
    }
}
