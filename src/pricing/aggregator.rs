//! Multi-source price aggregation
//!
//! Each source is reduced to a trimmed-mean representative price, then the
//! representatives are combined by source weight. Weights are renormalized
//! only across whole sources that reported data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::stats::trimmed_mean;
use super::{PriceObservation, PriceSource};

/// Representative price for one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceQuote {
    pub source: PriceSource,
    /// Trimmed mean of the source's observations
    pub price: Decimal,
    pub weight: Decimal,
    pub sample_count: usize,
}

/// Weighted aggregate over all contributing sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateQuote {
    /// Weighted base price before multipliers
    pub base_price: Decimal,
    /// Fraction of total defined source weight that reported data
    pub quality_indicator: Decimal,
    /// Number of distinct contributing sources
    pub source_count: usize,
    /// Most recent observation across all sources
    pub latest_observation: DateTime<Utc>,
    /// Per-source breakdown, ordered by source
    pub sources: Vec<SourceQuote>,
}

/// Aggregation outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// At least one usable observation
    Priced(AggregateQuote),
    /// No usable observations anywhere
    NoData,
}

impl Aggregation {
    /// Get the quote if any data was present
    pub fn quote(&self) -> Option<&AggregateQuote> {
        match self {
            Aggregation::Priced(quote) => Some(quote),
            Aggregation::NoData => None,
        }
    }
}

/// Aggregate normalized observations into a base price
pub fn aggregate(observations: &[PriceObservation]) -> Aggregation {
    let Some(latest_observation) = observations.iter().map(|o| o.observed_at).max() else {
        return Aggregation::NoData;
    };

    let mut by_source: BTreeMap<PriceSource, Vec<Decimal>> = BTreeMap::new();
    for obs in observations {
        by_source.entry(obs.source).or_default().push(obs.price);
    }

    let sources: Vec<SourceQuote> = by_source
        .into_iter()
        .filter_map(|(source, prices)| {
            Some(SourceQuote {
                source,
                price: trimmed_mean(&prices)?,
                weight: source.weight(),
                sample_count: prices.len(),
            })
        })
        .collect();

    let weight_present: Decimal = sources.iter().map(|q| q.weight).sum();
    if weight_present.is_zero() {
        return Aggregation::NoData;
    }
    let weighted_sum: Decimal = sources.iter().map(|q| q.price * q.weight).sum();

    Aggregation::Priced(AggregateQuote {
        base_price: weighted_sum / weight_present,
        quality_indicator: weight_present,
        source_count: sources.len(),
        latest_observation,
        sources,
    })
}
