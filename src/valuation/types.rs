//! Valuation output types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ConfidenceFactors, ConfidenceLevel, MultiplierSet};
use crate::card::ValidationError;
use crate::pricing::{MarketTrend, SourceQuote};

/// Errors returned by the valuation engine
#[derive(Debug, Error, PartialEq)]
pub enum ValuationError {
    #[error("invalid card attributes: {0}")]
    Validation(#[from] ValidationError),
}

/// Low/high band around the final value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: Decimal,
    pub high: Decimal,
}

impl ValueRange {
    /// Check whether a price lies inside the band, inclusive
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.low && price <= self.high
    }
}

/// One valuation result
///
/// Produced fresh on every call; revaluation builds a new estimate rather
/// than editing an old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueEstimate {
    /// Weighted market price before multipliers, in cents
    pub base_price: Decimal,
    pub multiplier_set: MultiplierSet,
    /// `base_price * composite`, in cents
    pub final_value: Decimal,
    /// Score in [0, 1]
    pub confidence: Decimal,
    /// Distinct sources that contributed observations
    pub source_count: usize,
    pub generated_at: DateTime<Utc>,
    /// Fraction of defined source weight that reported data
    pub quality_indicator: Decimal,
    pub confidence_level: ConfidenceLevel,
    pub confidence_factors: ConfidenceFactors,
    pub value_range: ValueRange,
    pub trend: MarketTrend,
    /// Per-source representative prices
    #[serde(default)]
    pub sources: Vec<SourceQuote>,
    /// Advice for ungraded cards
    pub grading_recommendation: Option<String>,
    /// Whether the base price came from the deterministic fallback
    pub used_mock_price: bool,
}

/// Comparison of a new estimate against an earlier one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revaluation {
    pub previous: ValueEstimate,
    pub current: ValueEstimate,
    /// `current.final_value - previous.final_value`
    pub change: Decimal,
    /// Percent change, `None` when the previous value was zero
    pub change_pct: Option<Decimal>,
}

impl Revaluation {
    /// Pair two estimates and compute the change
    pub fn new(previous: ValueEstimate, current: ValueEstimate) -> Self {
        let change = current.final_value - previous.final_value;
        let change_pct = if previous.final_value.is_zero() {
            None
        } else {
            Some((change / previous.final_value * Decimal::ONE_HUNDRED).round_dp(2))
        };
        Self {
            previous,
            current,
            change,
            change_pct,
        }
    }
}
