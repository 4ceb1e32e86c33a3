//! Pricing module
//!
//! Normalizes sold listings from external sources and aggregates them into
//! a weighted base price

mod adapter;
mod aggregator;
pub mod ebay;
mod stats;
mod trend;
mod types;

pub use adapter::{normalize, normalize_all, DropReason, MAX_PLAUSIBLE_PRICE, OUTLIER_RATIO};
pub use aggregator::{aggregate, AggregateQuote, Aggregation, SourceQuote};
pub use trend::{
    analyze as analyze_trend, MarketRecommendation, MarketTrend, TrendDirection, Volatility,
};
pub use types::{PriceObservation, PriceSource, RawPricingPayload, RawSaleRecord};

pub(crate) use stats::{mean, median};

use crate::card::CardAttributes;
use async_trait::async_trait;

/// Trait for sold-listing fetchers that feed the adapter
///
/// Fetching runs outside the valuation core; results are handed in as payloads.
#[async_trait]
pub trait SoldListingProvider: Send + Sync {
    /// Source this provider reports for
    fn source(&self) -> PriceSource;
    /// Fetch completed sales matching a card
    async fn fetch_sold(&self, card: &CardAttributes) -> anyhow::Result<RawPricingPayload>;
}
