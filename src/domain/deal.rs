//! Prospective deals in the sales pipeline.

use crate::domain::{Decimal, DealId, MarketKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pipeline stage. Any stage may move to any other; no transition rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Prospect,
    Qualified,
    Proposal,
    OnHold,
    AwaitingFunding,
    ClosedWon,
    ClosedLost,
}

impl Stage {
    /// All stages in board order.
    pub const ALL: [Stage; 7] = [
        Stage::Prospect,
        Stage::Qualified,
        Stage::Proposal,
        Stage::OnHold,
        Stage::AwaitingFunding,
        Stage::ClosedWon,
        Stage::ClosedLost,
    ];

    /// Wire spelling, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Prospect => "prospect",
            Stage::Qualified => "qualified",
            Stage::Proposal => "proposal",
            Stage::OnHold => "on_hold",
            Stage::AwaitingFunding => "awaiting_funding",
            Stage::ClosedWon => "closed_won",
            Stage::ClosedLost => "closed_lost",
        }
    }

    /// Column heading used on the pipeline board.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Prospect => "Prospect",
            Stage::Qualified => "Qualified",
            Stage::Proposal => "Proposal",
            Stage::OnHold => "On Hold",
            Stage::AwaitingFunding => "Awaiting Funding",
            Stage::ClosedWon => "Closed Won",
            Stage::ClosedLost => "Closed Lost",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stage: {0}")]
pub struct StageParseError(pub String);

impl FromStr for Stage {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == normalized)
            .ok_or_else(|| StageParseError(s.to_string()))
    }
}

/// Outright sale terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectSales {
    pub units: Decimal,
    pub price_per_unit: Decimal,
    /// Ex-works cost; landed cost is derived from it.
    pub cost_per_unit: Decimal,
}

/// Lease alternative to an outright sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseModel {
    pub units: Decimal,
    pub monthly_lease: Decimal,
    pub term_months: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Potential {
    pub direct_sales: DirectSales,
    pub lease_model: LeaseModel,
}

/// A party sharing in the deal's proceeds.
///
/// Percentages are informational and are not required to sum to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub name: String,
    pub percentage: Decimal,
}

/// A prospective sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: DealId,
    pub name: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub stage: Stage,
    pub potential: Potential,
    /// Not checked against the market table; unknown keys fall back to zero logistics cost.
    pub market_key: MarketKey,
    #[serde(default)]
    pub payouts: Vec<Payout>,
}

impl Deal {
    /// Copy of this deal moved to `stage`.
    pub fn with_stage(&self, stage: Stage) -> Self {
        Self {
            stage,
            ..self.clone()
        }
    }

    /// Sum of payout percentages, for display next to the payout list.
    pub fn payout_percentage_total(&self) -> Decimal {
        self.payouts.iter().map(|p| p.percentage).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serialization() {
        assert_eq!(
            serde_json::to_string(&Stage::AwaitingFunding).unwrap(),
            "\"awaiting_funding\""
        );
        let parsed: Stage = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(parsed, Stage::OnHold);
    }

    #[test]
    fn test_stage_from_str_accepts_labels() {
        assert_eq!("closed_won".parse::<Stage>().unwrap(), Stage::ClosedWon);
        assert_eq!("On Hold".parse::<Stage>().unwrap(), Stage::OnHold);
        assert_eq!("awaiting-funding".parse::<Stage>().unwrap(), Stage::AwaitingFunding);
        assert!("negotiation".parse::<Stage>().is_err());
    }

    #[test]
    fn test_stage_as_str_matches_serde() {
        for stage in Stage::ALL {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
        }
    }

    #[test]
    fn test_stage_order_follows_board() {
        assert!(Stage::Prospect < Stage::Qualified);
        assert!(Stage::AwaitingFunding < Stage::ClosedWon);
        assert_eq!(Stage::OnHold.to_string(), "On Hold");
    }
}
