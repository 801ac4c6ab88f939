use crate::domain::{
    Deal, DealId, DirectSales, LeaseModel, MarketKey, Payout, Potential, Stage,
};
use rust_decimal::Decimal as RustDecimal;
use rust_decimal_macros::dec;

struct Terms {
    units: RustDecimal,
    price: RustDecimal,
    cost: RustDecimal,
    monthly_lease: RustDecimal,
    term_months: RustDecimal,
}

fn deal(
    id: &str,
    name: &str,
    domain: &str,
    stage: Stage,
    market: &str,
    terms: Terms,
    payouts: &[(&str, RustDecimal)],
) -> Deal {
    Deal {
        id: DealId::new(id),
        name: name.to_string(),
        domain: domain.to_string(),
        logo: None,
        stage,
        potential: Potential {
            direct_sales: DirectSales {
                units: terms.units.into(),
                price_per_unit: terms.price.into(),
                cost_per_unit: terms.cost.into(),
            },
            lease_model: LeaseModel {
                units: terms.units.into(),
                monthly_lease: terms.monthly_lease.into(),
                term_months: terms.term_months.into(),
            },
        },
        market_key: MarketKey::new(market),
        payouts: payouts
            .iter()
            .map(|(name, pct)| Payout {
                name: name.to_string(),
                percentage: (*pct).into(),
            })
            .collect(),
    }
}

/// Built-in sales pipeline.
///
/// `deal-ghana` points at a market with no logistics data and
/// `deal-kenya` sells below landed cost.
pub fn seed_deals() -> Vec<Deal> {
    vec![
        deal(
            "deal-jordan",
            "Aqaba Fuel Terminals",
            "aqabafuel.example",
            Stage::Proposal,
            "jordan",
            Terms {
                units: dec!(4),
                price: dec!(48000),
                cost: dec!(25000),
                monthly_lease: dec!(1450),
                term_months: dec!(48),
            },
            &[("Regional Partner", dec!(15)), ("Vendor", dec!(85))],
        ),
        deal(
            "deal-uae",
            "Gulf Storage Co",
            "gulfstorage.example",
            Stage::Qualified,
            "uae",
            Terms {
                units: dec!(6),
                price: dec!(46000),
                cost: dec!(25000),
                monthly_lease: dec!(1400),
                term_months: dec!(36),
            },
            &[("Vendor", dec!(100))],
        ),
        deal(
            "deal-saudi",
            "Eastern Province Logistics",
            "eplogistics.example",
            Stage::AwaitingFunding,
            "saudi",
            Terms {
                units: dec!(10),
                price: dec!(47500),
                cost: dec!(24000),
                monthly_lease: dec!(1350),
                term_months: dec!(60),
            },
            &[("Agent", dec!(10)), ("Distributor", dec!(20)), ("Vendor", dec!(70))],
        ),
        deal(
            "deal-egypt",
            "Delta Petroleum Services",
            "deltapetro.example",
            Stage::Prospect,
            "egypt",
            Terms {
                units: dec!(2),
                price: dec!(42000),
                cost: dec!(25000),
                monthly_lease: dec!(1300),
                term_months: dec!(36),
            },
            &[("Vendor", dec!(100))],
        ),
        deal(
            "deal-kenya",
            "Mombasa Bulk Fuels",
            "mombasabulk.example",
            Stage::OnHold,
            "kenya",
            Terms {
                units: dec!(3),
                price: dec!(36000),
                cost: dec!(25000),
                monthly_lease: dec!(1250),
                term_months: dec!(48),
            },
            &[("Agent", dec!(12)), ("Vendor", dec!(88))],
        ),
        deal(
            "deal-india",
            "Western Coast Refiners",
            "wcrefiners.example",
            Stage::ClosedWon,
            "india",
            Terms {
                units: dec!(8),
                price: dec!(52000),
                cost: dec!(23500),
                monthly_lease: dec!(1500),
                term_months: dec!(60),
            },
            &[("Distributor", dec!(25)), ("Vendor", dec!(75))],
        ),
        deal(
            "deal-mexico",
            "Golfo Terminales",
            "golfoterminales.example",
            Stage::ClosedLost,
            "mexico",
            Terms {
                units: dec!(5),
                price: dec!(45000),
                cost: dec!(25000),
                monthly_lease: dec!(1400),
                term_months: dec!(36),
            },
            &[("Vendor", dec!(100))],
        ),
        deal(
            "deal-ghana",
            "Tema Energy Hub",
            "temaenergy.example",
            Stage::Prospect,
            "ghana",
            Terms {
                units: dec!(2),
                price: dec!(44000),
                cost: dec!(25000),
                monthly_lease: dec!(1350),
                term_months: dec!(48),
            },
            &[("Agent", dec!(10)), ("Vendor", dec!(80))],
        ),
    ]
}
