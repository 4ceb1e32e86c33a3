//! Pricing source types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External sold-listing price source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceSource {
    #[serde(rename = "ebay")]
    Ebay,
    #[serde(rename = "130point")]
    OneThirtyPoint,
    #[serde(rename = "pwcc")]
    Pwcc,
    #[serde(rename = "comc")]
    Comc,
    #[serde(rename = "beckett")]
    Beckett,
    #[serde(rename = "psa_apr")]
    PsaApr,
    #[serde(rename = "sportlots")]
    SportLots,
}

impl PriceSource {
    /// Every defined source, heaviest weight first
    pub const ALL: [PriceSource; 7] = [
        PriceSource::Ebay,
        PriceSource::OneThirtyPoint,
        PriceSource::Pwcc,
        PriceSource::Comc,
        PriceSource::Beckett,
        PriceSource::PsaApr,
        PriceSource::SportLots,
    ];

    /// Fixed aggregation weight; all weights sum to 1.0
    pub fn weight(&self) -> Decimal {
        match self {
            PriceSource::Ebay => dec!(0.35),
            PriceSource::OneThirtyPoint => dec!(0.20),
            PriceSource::Pwcc => dec!(0.15),
            PriceSource::Comc => dec!(0.10),
            PriceSource::Beckett => dec!(0.08),
            PriceSource::PsaApr => dec!(0.07),
            PriceSource::SportLots => dec!(0.05),
        }
    }

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSource::Ebay => "ebay",
            PriceSource::OneThirtyPoint => "130point",
            PriceSource::Pwcc => "pwcc",
            PriceSource::Comc => "comc",
            PriceSource::Beckett => "beckett",
            PriceSource::PsaApr => "psa_apr",
            PriceSource::SportLots => "sportlots",
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sold listing as a source reported it
///
/// Fields are optional because sources omit them; the adapter decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSaleRecord {
    /// Sale price in USD
    #[serde(default)]
    pub price: Option<Decimal>,
    /// When the listing sold
    #[serde(default)]
    pub sold_at: Option<DateTime<Utc>>,
    /// Listing URL
    #[serde(default)]
    pub url: Option<String>,
}

impl RawSaleRecord {
    /// Create a record with price and timestamp
    pub fn new(price: Decimal, sold_at: DateTime<Utc>) -> Self {
        Self {
            price: Some(price),
            sold_at: Some(sold_at),
            url: None,
        }
    }
}

/// Already-fetched sold listings from one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPricingPayload {
    pub source: PriceSource,
    #[serde(default)]
    pub records: Vec<RawSaleRecord>,
}

impl RawPricingPayload {
    /// Create a payload for a source
    pub fn new(source: PriceSource, records: Vec<RawSaleRecord>) -> Self {
        Self { source, records }
    }
}

/// One normalized sold-listing data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Reporting source
    pub source: PriceSource,
    /// Sale price, always positive
    pub price: Decimal,
    /// Sale time
    pub observed_at: DateTime<Utc>,
    /// Fixed weight of the source
    pub source_weight: Decimal,
}
