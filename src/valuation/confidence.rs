//! Confidence scoring
//!
//! Five factors, each in [0, 1], combined by fixed weights:
//! - source coverage (quality indicator)
//! - number of contributing sources
//! - recency of the newest sale
//! - completeness of optional card attributes
//! - extremity of the composite multiplier

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::MultiplierSet;
use crate::card::CardAttributes;
use crate::config::ConfidenceConfig;

const COVERAGE_WEIGHT: Decimal = dec!(0.30);
const SOURCE_COUNT_WEIGHT: Decimal = dec!(0.20);
const RECENCY_WEIGHT: Decimal = dec!(0.20);
const COMPLETENESS_WEIGHT: Decimal = dec!(0.15);
const EXTREMITY_WEIGHT: Decimal = dec!(0.15);

/// Composite multiplier where the extremity penalty starts
const EXTREMITY_START: Decimal = dec!(10);
/// Extremity factor at the composite cap
const EXTREMITY_FLOOR: Decimal = dec!(0.2);

const SECONDS_PER_DAY: i64 = 86_400;

/// Coarse confidence bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConfidenceLevel {
    /// Bucket a score in [0, 1]
    pub fn from_score(score: Decimal) -> Self {
        if score >= dec!(0.85) {
            ConfidenceLevel::VeryHigh
        } else if score >= dec!(0.75) {
            ConfidenceLevel::High
        } else if score >= dec!(0.60) {
            ConfidenceLevel::Medium
        } else if score >= dec!(0.40) {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::VeryHigh => write!(f, "very high"),
            ConfidenceLevel::High => write!(f, "high"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::Low => write!(f, "low"),
            ConfidenceLevel::VeryLow => write!(f, "very low"),
        }
    }
}

/// Inputs to the scorer for one estimate
#[derive(Debug, Clone)]
pub struct ConfidenceInputs<'a> {
    pub card: &'a CardAttributes,
    /// Fraction of defined source weight that reported data
    pub quality_indicator: Decimal,
    /// Distinct contributing sources
    pub source_count: usize,
    /// Newest observation, `None` without market data
    pub latest_observation: Option<DateTime<Utc>>,
    pub multipliers: &'a MultiplierSet,
    /// Reference time for recency
    pub now: DateTime<Utc>,
}

/// Per-factor values, each in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    pub source_coverage: Decimal,
    pub source_count: Decimal,
    pub data_recency: Decimal,
    pub attribute_completeness: Decimal,
    pub multiplier_extremity: Decimal,
}

/// Weighted confidence with its breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    /// Total in [0, 1]
    pub score: Decimal,
    pub level: ConfidenceLevel,
    pub factors: ConfidenceFactors,
}

/// Confidence scorer
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
}

impl ConfidenceScorer {
    /// Create a scorer with the given recency window
    pub fn new(config: ConfidenceConfig) -> Self {
        Self { config }
    }

    /// Score an estimate
    pub fn score(&self, inputs: &ConfidenceInputs<'_>) -> ConfidenceScore {
        let factors = ConfidenceFactors {
            source_coverage: unit_clamp(inputs.quality_indicator),
            source_count: source_count_factor(inputs.source_count),
            data_recency: self.recency_factor(inputs.latest_observation, inputs.now),
            attribute_completeness: completeness_factor(inputs.card),
            multiplier_extremity: extremity_factor(inputs.multipliers.composite),
        };

        let total = factors.source_coverage * COVERAGE_WEIGHT
            + factors.source_count * SOURCE_COUNT_WEIGHT
            + factors.data_recency * RECENCY_WEIGHT
            + factors.attribute_completeness * COMPLETENESS_WEIGHT
            + factors.multiplier_extremity * EXTREMITY_WEIGHT;
        let score = unit_clamp(total).round_dp(4);

        ConfidenceScore {
            score,
            level: ConfidenceLevel::from_score(score),
            factors,
        }
    }

    /// Linear decay from `fresh_days` (1.0) to `stale_days` (0.0)
    fn recency_factor(&self, latest: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Decimal {
        let Some(latest) = latest else {
            return Decimal::ZERO;
        };
        let age_days = Decimal::from((now - latest).num_seconds()) / Decimal::from(SECONDS_PER_DAY);
        let fresh = Decimal::from(self.config.fresh_days);
        let stale = Decimal::from(self.config.stale_days);

        if age_days <= fresh {
            Decimal::ONE
        } else if age_days >= stale {
            Decimal::ZERO
        } else {
            (stale - age_days) / (stale - fresh)
        }
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(ConfidenceConfig::default())
    }
}

/// Saturating credit for independent sources
fn source_count_factor(count: usize) -> Decimal {
    match count {
        0 => Decimal::ZERO,
        1 => dec!(0.3),
        2 => dec!(0.65),
        _ => Decimal::ONE,
    }
}

/// Fraction of grade, serial numbering, and parallel that were supplied
fn completeness_factor(card: &CardAttributes) -> Decimal {
    let supplied = [
        card.is_graded(),
        card.print_run().is_some(),
        card.parallel.is_some(),
    ]
    .iter()
    .filter(|s| **s)
    .count();
    Decimal::from(supplied) / Decimal::from(3)
}

/// Full credit up to 10x, falling linearly to the floor at the 25x cap
fn extremity_factor(composite: Decimal) -> Decimal {
    let cap = super::MAX_COMPOSITE_MULTIPLIER;
    if composite <= EXTREMITY_START {
        Decimal::ONE
    } else if composite >= cap {
        EXTREMITY_FLOOR
    } else {
        let progress = (composite - EXTREMITY_START) / (cap - EXTREMITY_START);
        Decimal::ONE - progress * (Decimal::ONE - EXTREMITY_FLOOR)
    }
}

fn unit_clamp(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(Decimal::ONE)
}
