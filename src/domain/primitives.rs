//! Domain primitives: DealId, MarketKey.

use serde::{Deserialize, Serialize};

/// Stable identifier of a deal in the sales pipeline.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealId(pub String);

impl DealId {
    /// Create a DealId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        DealId(id.into())
    }

    /// Get the id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DealId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key into the market-logistics table (e.g., "jordan").
///
/// Keys are compared case-insensitively by normalizing to lowercase on creation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct MarketKey(pub String);

impl MarketKey {
    /// Create a MarketKey, trimming and lowercasing the input.
    pub fn new(key: impl AsRef<str>) -> Self {
        MarketKey(key.as_ref().trim().to_lowercase())
    }

    /// Get the key as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MarketKey {
    fn from(value: String) -> Self {
        MarketKey::new(value)
    }
}

impl std::fmt::Display for MarketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
